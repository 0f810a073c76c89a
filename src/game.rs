use std::thread;
use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::board::{Board, Cell};
use crate::config::Settings;
use crate::console::Console;
use crate::error::{GameError, Result};
use crate::food::place_food;
use crate::input::{self, Command};
use crate::render;
use crate::signal::Interrupt;
use crate::snake::{Direction, Snake};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HitWall,
    HitSelf,
    Quit,
    Interrupted,
    /// The snake filled the board.
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Over(Outcome),
}

/// All state of one game. Only `tick` mutates it.
#[derive(Debug)]
pub struct Game<R> {
    board: Board,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    state: GameState,
    rng: R,
}

impl<R> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, snake: Snake, food: Option<Cell>, rng: R) -> Self {
        Game {
            board,
            snake,
            food,
            score: 0,
            state: GameState::Running,
            rng,
        }
    }

    fn end(&mut self, outcome: Outcome) -> GameState {
        self.state = GameState::Over(outcome);
        self.state
    }
}

impl<R: Rng> Game<R> {
    /// A one-cell snake in the middle of the board heading right, and one food.
    pub fn new(board: Board, mut rng: R) -> Self {
        let snake = Snake::new(board.center(), Direction::Right);
        let food = place_food(&snake, &board, &mut rng);
        let state = match food {
            Some(_) => GameState::Running,
            None => GameState::Over(Outcome::Won),
        };
        Game {
            board,
            snake,
            food,
            score: 0,
            state,
            rng,
        }
    }

    /// Advance one step. Does nothing once the game is over.
    pub fn tick(&mut self, command: Option<Command>) -> GameState {
        if self.state != GameState::Running {
            return self.state;
        }

        match command {
            Some(Command::Quit) => return self.end(Outcome::Quit),
            Some(Command::Interrupt) => return self.end(Outcome::Interrupted),
            Some(Command::Steer(direction)) => {
                if !self.snake.steer(direction) {
                    debug!(
                        "Ignoring reversal to {:?} while heading {:?}",
                        direction,
                        self.snake.direction()
                    );
                }
            }
            None => {}
        }

        // Walls are checked before the body.
        let new_head = match self.snake.next_head() {
            Some(cell) if !self.board.is_blocked(cell) => cell,
            _ => return self.end(Outcome::HitWall),
        };
        if self.snake.contains(new_head) {
            return self.end(Outcome::HitSelf);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);

        if ate {
            self.score += 1;
            self.food = place_food(&self.snake, &self.board, &mut self.rng);
            match self.food {
                Some(food) => debug!("Score {}, new food at {:?}", self.score, food),
                None => return self.end(Outcome::Won),
            }
        }

        self.state
    }
}

/// Drive a game on an already initialised console until it ends.
///
/// Shows the end screen and waits for a key, except after an interrupt (Ctrl+C
/// or a raised `interrupt`), which is returned as `GameError::Interrupted`.
pub fn run<C: Console, R: Rng>(
    console: &mut C,
    board: Board,
    settings: &Settings,
    interrupt: &Interrupt,
    rng: R,
) -> Result<Outcome> {
    let mut game = Game::new(board, rng);
    render::draw_frame(console, &game)?;

    let outcome = loop {
        let deadline = Instant::now() + settings.tick_rate;

        let mut command = input::poll_command(console, settings.tick_rate)?;
        if interrupt.is_raised() {
            command = Some(Command::Interrupt);
        }
        if let GameState::Over(outcome) = game.tick(command) {
            break outcome;
        }

        render::draw_frame(console, &game)?;
        thread::sleep(deadline.saturating_duration_since(Instant::now()));
    };

    info!(
        "Game ended: {:?}, score {}, length {}",
        outcome,
        game.score(),
        game.snake().len()
    );

    if outcome == Outcome::Interrupted {
        return Err(GameError::Interrupted);
    }

    render::draw_end_screen(console, &board, outcome, game.score())?;
    match console.wait_key(interrupt)? {
        Some(_) => Ok(outcome),
        None => {
            info!("Interrupted on the end screen");
            Err(GameError::Interrupted)
        }
    }
}

/// Size the board, take over the terminal, play, and give the terminal back
/// whatever happened.
pub fn play<C: Console, R: Rng>(
    console: &mut C,
    settings: &Settings,
    interrupt: &Interrupt,
    rng: R,
) -> Result<Outcome> {
    let (cols, rows) = console.size()?;
    let board = Board::from_terminal(cols, rows)?;
    info!(
        "Terminal {}x{}, board {}x{}",
        cols,
        rows,
        board.width(),
        board.height()
    );

    console.init()?;
    let result = run(console, board, settings, interrupt, rng);
    let restored = console.shutdown();

    let outcome = result?;
    restored?;
    Ok(outcome)
}
