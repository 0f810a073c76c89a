use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::snake::Snake;

const MAX_SAMPLES: usize = 64;

/// Pick a random interior cell not covered by the snake.
///
/// Returns `None` when the snake fills the whole interior.
pub fn place_food(snake: &Snake, board: &Board, rng: &mut impl Rng) -> Option<Cell> {
    if snake.len() >= board.interior_len() {
        return None;
    }

    for _ in 0..MAX_SAMPLES {
        let cell = Cell::new(
            rng.gen_range(1..board.height() - 1),
            rng.gen_range(1..board.width() - 1),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    // Crowded board, pick from what is left
    debug!("Food sampling missed {} times, scanning free cells", MAX_SAMPLES);
    board.interior().filter(|c| !snake.contains(*c)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_is_inside_and_off_snake() {
        let board = Board::new(10, 12).unwrap();
        let snake = Snake::from_cells(
            [Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3), Cell::new(5, 2)],
            Direction::Right,
        );
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let food = place_food(&snake, &board, &mut rng).unwrap();
            assert!(!board.is_blocked(food), "food on border: {:?}", food);
            assert!(!snake.contains(food), "food on snake: {:?}", food);
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let board = Board::new(5, 5).unwrap();
        // Interior is 3x3; cover everything but (2, 2).
        let cells: Vec<Cell> = board.interior().filter(|c| *c != Cell::new(2, 2)).collect();
        let snake = Snake::from_cells(cells, Direction::Up);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(place_food(&snake, &board, &mut rng), Some(Cell::new(2, 2)));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let board = Board::new(4, 4).unwrap();
        let snake = Snake::from_cells(board.interior(), Direction::Up);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(place_food(&snake, &board, &mut rng), None);
    }
}
