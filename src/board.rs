use crate::error::{GameError, Result};
use crate::snake::Direction;

/// A grid coordinate, row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    pub const fn new(row: u16, col: u16) -> Self {
        Cell { row, col }
    }

    /// The neighbouring cell in `direction`, or `None` when it would leave `u16` range.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = u16::try_from(i32::from(self.row) + dr).ok()?;
        let col = u16::try_from(i32::from(self.col) + dc).ok()?;
        Some(Cell { row, col })
    }
}

/// Playable area. The outermost rows and columns are the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    height: u16,
    width: u16,
}

impl Board {
    pub const MIN_SIZE: u16 = 4;

    /// Derive the board from the terminal size, keeping the last row and column free.
    pub fn from_terminal(cols: u16, rows: u16) -> Result<Board> {
        Board::new(rows.saturating_sub(1), cols.saturating_sub(1))
    }

    pub fn new(height: u16, width: u16) -> Result<Board> {
        if height < Self::MIN_SIZE || width < Self::MIN_SIZE {
            return Err(GameError::TerminalTooSmall { width, height });
        }
        Ok(Board { height, width })
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.height / 2, self.width / 2)
    }

    /// True for border cells and anything beyond them.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        cell.row == 0
            || cell.col == 0
            || cell.row >= self.height - 1
            || cell.col >= self.width - 1
    }

    /// True if the cell may be drawn, border included.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn interior(&self) -> impl Iterator<Item = Cell> {
        let (height, width) = (self.height, self.width);
        (1..height - 1).flat_map(move |row| (1..width - 1).map(move |col| Cell::new(row, col)))
    }

    pub fn interior_len(&self) -> usize {
        usize::from(self.height - 2) * usize::from(self.width - 2)
    }
}
