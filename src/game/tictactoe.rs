//! Tic-Tac-Toe board: 3x3, three in a row wins

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cell, GameKind, GameState, Mark, lines::TICTACTOE_LINES};
use crate::{Error, Result};

const SIZE: usize = 3;
const CELLS: usize = SIZE * SIZE;

/// Tic-Tac-Toe state: nine cells in row-major order plus the terminal winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TicTacToe {
    cells: [Cell; CELLS],
    terminal_winner: Option<Mark>,
}

impl TicTacToe {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from a 9-character string (`X`, `O`, `.` or space).
    ///
    /// Newlines are ignored, so the `Display` output parses back. The terminal
    /// winner is left unset.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are given or any character is invalid.
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|&c| c != '\n').collect();
        if chars.len() < CELLS {
            return Err(Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELLS];
        for (i, &c) in chars.iter().take(CELLS).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self {
            cells,
            terminal_winner: None,
        })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= CELLS {
            return Err(Error::MoveOutOfRange {
                game: GameKind::TicTacToe,
                position,
                limit: CELLS,
            });
        }
        Ok(())
    }
}

impl GameState for TicTacToe {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    fn dimensions(&self) -> (usize, usize) {
        (SIZE, SIZE)
    }

    fn win_length(&self) -> usize {
        SIZE
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(row < SIZE && col < SIZE, "cell ({row}, {col}) is off the board");
        self.cells[row * SIZE + col]
    }

    fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    fn apply_move(&mut self, position: usize, mark: Mark) -> Result<()> {
        self.check_position(position)?;
        if !self.cells[position].is_empty() {
            return Err(Error::IllegalMove {
                game: GameKind::TicTacToe,
                position,
            });
        }

        self.cells[position] = mark.to_cell();
        if self.winner_at(position, mark) {
            self.terminal_winner = Some(mark);
        }
        Ok(())
    }

    fn undo_move(&mut self, position: usize) -> Result<()> {
        self.check_position(position)?;
        if self.cells[position].is_empty() {
            return Err(Error::NothingToUndo {
                game: GameKind::TicTacToe,
                position,
            });
        }

        self.cells[position] = Cell::Empty;
        self.terminal_winner = None;
        Ok(())
    }

    fn winner_at(&self, position: usize, mark: Mark) -> bool {
        if position >= CELLS {
            return false;
        }
        let target = mark.to_cell();
        // Only lines through the anchor: its row, its column and any diagonal
        // it sits on (corners and center).
        TICTACTOE_LINES
            .iter()
            .filter(|line| line.contains(&position))
            .any(|line| line.iter().all(|&idx| self.cells[idx] == target))
    }

    fn terminal_winner(&self) -> Option<Mark> {
        self.terminal_winner
    }

    fn clear_terminal_winner(&mut self) {
        self.terminal_winner = None;
    }

    fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    fn serialized_state(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    fn render(&self) -> String {
        self.cells
            .chunks(SIZE)
            .map(|row| {
                let marks: Vec<String> = row
                    .iter()
                    .map(|c| match c {
                        Cell::Empty => " ".to_string(),
                        other => other.to_char().to_string(),
                    })
                    .collect();
                format!("| {} |", marks.join(" | "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(SIZE) && i < CELLS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = TicTacToe::new();
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.terminal_winner(), None);
        assert_eq!(board.serialized_state(), ".........");
    }

    #[test]
    fn test_available_moves_after_center_and_corner() {
        let mut board = TicTacToe::new();
        board.apply_move(4, Mark::X).unwrap();
        board.apply_move(0, Mark::O).unwrap();

        assert_eq!(board.available_moves(), vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut board = TicTacToe::new();
        board.apply_move(4, Mark::X).unwrap();
        let before = board;

        let err = board.apply_move(4, Mark::O).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { position: 4, .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut board = TicTacToe::new();
        assert!(matches!(
            board.apply_move(9, Mark::X),
            Err(Error::MoveOutOfRange { position: 9, .. })
        ));
        assert!(!board.winner_at(42, Mark::X));
    }

    #[test]
    fn test_top_row_win() {
        let board = TicTacToe::from_string("XXX      ").unwrap();
        assert!(board.winner_at(2, Mark::X));
        assert!(!board.winner_at(2, Mark::O));
    }

    #[test]
    fn test_win_sets_and_undo_clears_terminal_winner() {
        let mut board = TicTacToe::from_string("XX.OO....").unwrap();
        board.apply_move(2, Mark::X).unwrap();
        assert_eq!(board.terminal_winner(), Some(Mark::X));

        board.undo_move(2).unwrap();
        assert_eq!(board.terminal_winner(), None);
        assert_eq!(board.serialized_state(), "XX.OO....");
    }

    #[test]
    fn test_edge_cell_ignores_diagonals() {
        // Anti-diagonal 2-4-6 is complete, but cell 1 is not on it
        let board = TicTacToe::from_string(".XX.X.X..").unwrap();
        assert!(!board.winner_at(1, Mark::X));
        assert!(board.winner_at(6, Mark::X));
    }

    #[test]
    fn test_center_checks_both_diagonals() {
        let board = TicTacToe::from_string("O.X.X.X.O").unwrap();
        assert!(board.winner_at(4, Mark::X));
    }

    #[test]
    fn test_undo_empty_cell_fails() {
        let mut board = TicTacToe::new();
        assert!(matches!(
            board.undo_move(3),
            Err(Error::NothingToUndo { position: 3, .. })
        ));
    }

    #[test]
    fn test_render_and_display() {
        let board = TicTacToe::from_string("XOX.O.X..").unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
        assert_eq!(board.render().lines().next(), Some("| X | O | X |"));
        assert_eq!(TicTacToe::from_string(&board.to_string()).unwrap(), board);
    }

    #[test]
    fn test_full_board() {
        let board = TicTacToe::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
        assert_eq!(board.empty_cell_count(), 0);
    }
}
