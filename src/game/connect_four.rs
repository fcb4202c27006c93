//! Connect-4 board: 6 rows by 7 columns, pieces drop to the lowest free cell

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cell, GameKind, GameState, Mark, lines::DIRECTIONS};
use crate::{Error, Result};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
const CONNECT: usize = 4;

/// Connect-4 state. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConnectFour {
    cells: [[Cell; COLS]; ROWS],
    terminal_winner: Option<Mark>,
}

impl ConnectFour {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from 42 characters in row-major order, top row first.
    ///
    /// Newlines are ignored, so the `Display` output parses back.
    ///
    /// # Errors
    ///
    /// Returns error on a short string, an unknown character, or a mark
    /// floating above an empty cell.
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|&c| c != '\n').collect();
        if chars.len() < ROWS * COLS {
            return Err(Error::InvalidBoardLength {
                expected: ROWS * COLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = Self::new();
        for (i, &c) in chars.iter().take(ROWS * COLS).enumerate() {
            board.cells[i / COLS][i % COLS] =
                Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }

        for row in 0..ROWS - 1 {
            for col in 0..COLS {
                if !board.cells[row][col].is_empty() && board.cells[row + 1][col].is_empty() {
                    return Err(Error::InvalidConfiguration {
                        message: format!("mark at row {row}, column {col} is floating in '{s}'"),
                    });
                }
            }
        }

        Ok(board)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || !self.cells[0][col].is_empty()
    }

    /// Row of the topmost mark in `col`, i.e. the cell filled most recently
    fn top_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).find(|&row| !self.cells[row][col].is_empty())
    }

    /// Row where a piece dropped into `col` would land
    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Count contiguous `target` cells from `(row, col)` stepping by
    /// `(dr, dc)`, excluding the start cell
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, target: Cell) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row, col);
        loop {
            let (Some(next_r), Some(next_c)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
            else {
                break;
            };
            if next_r >= ROWS || next_c >= COLS || self.cells[next_r][next_c] != target {
                break;
            }
            count += 1;
            r = next_r;
            c = next_c;
        }
        count
    }

    fn check_column(&self, col: usize) -> Result<()> {
        if col >= COLS {
            return Err(Error::MoveOutOfRange {
                game: GameKind::ConnectFour,
                position: col,
                limit: COLS,
            });
        }
        Ok(())
    }
}

impl GameState for ConnectFour {
    fn kind(&self) -> GameKind {
        GameKind::ConnectFour
    }

    fn dimensions(&self) -> (usize, usize) {
        (ROWS, COLS)
    }

    fn win_length(&self) -> usize {
        CONNECT
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    fn available_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    fn apply_move(&mut self, position: usize, mark: Mark) -> Result<()> {
        self.check_column(position)?;
        let row = self.landing_row(position).ok_or(Error::IllegalMove {
            game: GameKind::ConnectFour,
            position,
        })?;

        self.cells[row][position] = mark.to_cell();
        if self.winner_at(position, mark) {
            self.terminal_winner = Some(mark);
        }
        Ok(())
    }

    fn undo_move(&mut self, position: usize) -> Result<()> {
        self.check_column(position)?;
        let row = self.top_row(position).ok_or(Error::NothingToUndo {
            game: GameKind::ConnectFour,
            position,
        })?;

        self.cells[row][position] = Cell::Empty;
        self.terminal_winner = None;
        Ok(())
    }

    fn winner_at(&self, position: usize, mark: Mark) -> bool {
        if position >= COLS {
            return false;
        }
        let Some(row) = self.top_row(position) else {
            return false;
        };
        let target = mark.to_cell();
        if self.cells[row][position] != target {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let forward = self.run_length(row, position, dr, dc, target);
            let backward = self.run_length(row, position, -dr, -dc, target);
            1 + forward + backward >= CONNECT
        })
    }

    fn terminal_winner(&self) -> Option<Mark> {
        self.terminal_winner
    }

    fn clear_terminal_winner(&mut self) {
        self.terminal_winner = None;
    }

    fn empty_cell_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_empty())
            .count()
    }

    fn serialized_state(&self) -> String {
        self.cells.iter().flatten().map(|&c| c.to_char()).collect()
    }

    fn render(&self) -> String {
        let separator = "-".repeat(COLS * 4 + 1);
        let mut out = separator.clone();
        for row in &self.cells {
            out.push('\n');
            out.push('|');
            for cell in row {
                let symbol = if cell.is_empty() { ' ' } else { cell.to_char() };
                out.push_str(&format!(" {symbol} |"));
            }
            out.push('\n');
            out.push_str(&separator);
        }
        out
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < ROWS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_all(board: &mut ConnectFour, moves: &[(usize, Mark)]) {
        for &(col, mark) in moves {
            board.apply_move(col, mark).unwrap();
        }
    }

    #[test]
    fn pieces_fall_to_the_bottom() {
        let mut board = ConnectFour::new();
        board.apply_move(3, Mark::X).unwrap();
        board.apply_move(3, Mark::O).unwrap();

        assert_eq!(board.cell(5, 3), Cell::X);
        assert_eq!(board.cell(4, 3), Cell::O);
        assert_eq!(board.empty_cell_count(), 40);
    }

    #[test]
    fn vertical_four_wins_on_fourth_drop() {
        let mut board = ConnectFour::new();
        for _ in 0..3 {
            board.apply_move(3, Mark::X).unwrap();
            assert!(!board.winner_at(3, Mark::X));
            assert_eq!(board.terminal_winner(), None);
        }
        board.apply_move(3, Mark::X).unwrap();

        assert!(board.winner_at(3, Mark::X));
        assert_eq!(board.terminal_winner(), Some(Mark::X));
    }

    #[test]
    fn horizontal_win_counts_both_directions() {
        let mut board = ConnectFour::new();
        drop_all(
            &mut board,
            &[(0, Mark::O), (1, Mark::O), (3, Mark::O), (2, Mark::O)],
        );
        // Anchor in the middle of the run
        assert!(board.winner_at(2, Mark::O));
        assert!(board.winner_at(0, Mark::O));
    }

    #[test]
    fn diagonal_win_at_right_edge() {
        // X climbs from (5,3) to (2,6)
        let board = ConnectFour::from_string(concat!(
            ".......",
            ".......",
            "......X",
            ".....XO",
            "....XOO",
            "...XOOO",
        ))
        .unwrap();
        assert!(board.winner_at(6, Mark::X));
        assert!(board.winner_at(3, Mark::X));
        assert!(!board.winner_at(5, Mark::O));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let mut board = ConnectFour::new();
        drop_all(&mut board, &[(4, Mark::X), (5, Mark::X), (6, Mark::X)]);
        assert!(!board.winner_at(6, Mark::X));
        assert!(!board.winner_at(0, Mark::X));
    }

    #[test]
    fn full_column_rejects_move_without_mutation() {
        let mut board = ConnectFour::new();
        for i in 0..ROWS {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            board.apply_move(6, mark).unwrap();
        }
        let before = board;

        assert!(matches!(
            board.apply_move(6, Mark::X),
            Err(Error::IllegalMove { position: 6, .. })
        ));
        assert_eq!(board, before);
        assert_eq!(board.available_moves(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn undo_removes_topmost_piece_and_clears_winner() {
        let mut board = ConnectFour::new();
        drop_all(
            &mut board,
            &[(0, Mark::X), (1, Mark::X), (2, Mark::X), (3, Mark::X)],
        );
        assert_eq!(board.terminal_winner(), Some(Mark::X));

        board.undo_move(3).unwrap();
        assert_eq!(board.terminal_winner(), None);
        assert_eq!(board.cell(5, 3), Cell::Empty);
        assert!(matches!(
            board.undo_move(3),
            Err(Error::NothingToUndo { position: 3, .. })
        ));
    }

    #[test]
    fn floating_marks_are_rejected() {
        let mut text = ".".repeat(42);
        text.replace_range(0..1, "X");
        assert!(matches!(
            ConnectFour::from_string(&text),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn display_roundtrip() {
        let mut board = ConnectFour::new();
        drop_all(&mut board, &[(2, Mark::X), (2, Mark::O), (5, Mark::X)]);
        let parsed = ConnectFour::from_string(&board.to_string()).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(board.serialized_state().len(), 42);
    }
}
