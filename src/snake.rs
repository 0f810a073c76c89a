use std::collections::VecDeque;

use crate::board::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector as (row delta, column delta).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Body segments, head at the front.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Build a snake from its cells, head first.
    ///
    /// Panics if `cells` is empty or contains duplicates.
    #[cfg(test)]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs a head");
        assert!(
            body.iter()
                .enumerate()
                .all(|(i, c)| !body.iter().skip(i + 1).any(|other| other == c)),
            "snake cells must be distinct"
        );
        Snake { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn unless `direction` is the exact reverse of the current one.
    /// Returns whether the turn was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn next_head(&self) -> Option<Cell> {
        self.head().step(self.direction)
    }

    /// Push `new_head` onto the front. Drops the tail unless growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}
