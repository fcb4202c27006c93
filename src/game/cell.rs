//! Cells and player marks

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on a game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to the cell it occupies
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_char_roundtrip() {
        for cell in [Cell::Empty, Cell::X, Cell::O] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char(' '), Some(Cell::Empty));
        assert_eq!(Cell::from_char('?'), None);
    }

    #[test]
    fn opponent_is_involution() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent().opponent(), Mark::O);
        assert_eq!(Mark::O.to_cell().mark(), Some(Mark::O));
    }
}
