use crate::board::{Board, Cell};
use crate::console::{Console, Paint};
use crate::error::Result;
use crate::game::{Game, Outcome};

const BORDER_GLYPH: char = '#';
const HEAD_GLYPH: char = '@';
const BODY_GLYPH: char = 'o';
const FOOD_GLYPH: char = '*';

const CONTROLS_HINT: &str = "WASD/Arrows: Move | Q: Quit";

/// Draw `text` starting at `at`, cut at the right edge of the board.
fn put_text(
    console: &mut impl Console,
    board: &Board,
    at: Cell,
    text: &str,
    paint: Paint,
) -> Result<()> {
    if !board.contains(at) {
        return Ok(());
    }
    let room = usize::from(board.width() - at.col);
    let end = text
        .char_indices()
        .nth(room)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    console.draw_text(at, &text[..end], paint)
}

fn draw_border(console: &mut impl Console, board: &Board) -> Result<()> {
    let (bottom, right) = (board.height() - 1, board.width() - 1);
    for col in 0..board.width() {
        console.draw_cell(Cell::new(0, col), BORDER_GLYPH, Paint::Border)?;
        console.draw_cell(Cell::new(bottom, col), BORDER_GLYPH, Paint::Border)?;
    }
    for row in 1..bottom {
        console.draw_cell(Cell::new(row, 0), BORDER_GLYPH, Paint::Border)?;
        console.draw_cell(Cell::new(row, right), BORDER_GLYPH, Paint::Border)?;
    }
    Ok(())
}

/// Full redraw of a running game.
pub fn draw_frame<R>(console: &mut impl Console, game: &Game<R>) -> Result<()> {
    let board = game.board();
    console.clear();
    draw_border(console, board)?;

    let snake = game.snake();
    for &cell in snake.cells().skip(1).filter(|c| board.contains(**c)) {
        console.draw_cell(cell, BODY_GLYPH, Paint::SnakeBody)?;
    }
    if board.contains(snake.head()) {
        console.draw_cell(snake.head(), HEAD_GLYPH, Paint::SnakeHead)?;
    }

    if let Some(food) = game.food().filter(|c| board.contains(*c)) {
        console.draw_cell(food, FOOD_GLYPH, Paint::Food)?;
    }

    let score = format!("Score: {}", game.score());
    put_text(console, board, Cell::new(0, 2), &score, Paint::Text)?;

    if CONTROLS_HINT.len() < usize::from(board.width() - 2) {
        let at = Cell::new(board.height() - 1, 2);
        put_text(console, board, at, CONTROLS_HINT, Paint::Text)?;
    }

    console.refresh()
}

pub fn draw_end_screen(
    console: &mut impl Console,
    board: &Board,
    outcome: Outcome,
    score: u32,
) -> Result<()> {
    let headline = match outcome {
        Outcome::Won => "YOU WIN!",
        _ => "GAME OVER!",
    };
    let lines = [
        headline.to_string(),
        format!("Final Score: {}", score),
        "Press any key to exit...".to_string(),
    ];

    console.clear();
    let middle = board.height() / 2;
    for (line, row) in lines.iter().zip(middle.saturating_sub(1)..) {
        let half = u16::try_from(line.chars().count() / 2).unwrap_or(u16::MAX);
        let col = (board.width() / 2).saturating_sub(half);
        put_text(console, board, Cell::new(row, col), line, Paint::Text)?;
    }
    console.refresh()
}
