//! The game-state contract shared by both board variants
//!
//! Agents explore positions by mutating a single state in place: a candidate
//! move is applied, evaluated (possibly recursively) and then undone before the
//! next candidate is tried. Every `apply_move` must therefore be paired with an
//! `undo_move` at the same location, innermost first. [`probe`] packages that
//! pairing for callers that only need a single hypothetical move.

use std::fmt;

use super::{Cell, GameKind, Mark};
use crate::Result;

/// Mutable state of a two-player board game
///
/// Move identifiers are cell indices (0-8) for Tic-Tac-Toe and column indices
/// (0-6) for Connect-4.
pub trait GameState: fmt::Debug + Send {
    /// Which game this state belongs to
    fn kind(&self) -> GameKind;

    /// Board dimensions as `(rows, columns)`
    fn dimensions(&self) -> (usize, usize);

    /// Number of aligned marks needed to win
    fn win_length(&self) -> usize;

    /// Cell at `(row, col)`, row 0 on top
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside [`GameState::dimensions`].
    fn cell(&self, row: usize, col: usize) -> Cell;

    /// Legal move identifiers in ascending order; empty when the board is full
    fn available_moves(&self) -> Vec<usize>;

    /// Place `mark` at `position`.
    ///
    /// Sets the terminal winner when this move completes a line for `mark`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] when the cell is occupied or the
    /// column is full, and [`crate::Error::MoveOutOfRange`] for an unknown
    /// location. The state is left untouched in both cases.
    fn apply_move(&mut self, position: usize, mark: Mark) -> Result<()>;

    /// Remove the most recent mark placed at `position` and clear the
    /// terminal winner.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NothingToUndo`] when the location holds no mark.
    fn undo_move(&mut self, position: usize) -> Result<()>;

    /// Whether the mark at `position`'s resulting location completes a line
    /// for `mark`. Never mutates the board.
    fn winner_at(&self, position: usize, mark: Mark) -> bool;

    /// Mark that won with the most recent move, if any
    fn terminal_winner(&self) -> Option<Mark>;

    /// Forget the terminal winner without touching the board
    fn clear_terminal_winner(&mut self);

    /// Number of empty cells
    fn empty_cell_count(&self) -> usize;

    /// Row-major string encoding of the board, one character per cell
    fn serialized_state(&self) -> String;

    /// Human-readable grid with separators
    fn render(&self) -> String;

    /// Total number of cells on the board
    fn cell_count(&self) -> usize {
        let (rows, cols) = self.dimensions();
        rows * cols
    }

    fn is_full(&self) -> bool {
        self.empty_cell_count() == 0
    }

    /// True before any mark has been placed
    fn is_empty_board(&self) -> bool {
        self.empty_cell_count() == self.cell_count()
    }

    /// The game is over once someone has won or the board is full
    fn is_terminal(&self) -> bool {
        self.terminal_winner().is_some() || self.is_full()
    }

    fn is_legal(&self, position: usize) -> bool {
        self.available_moves().contains(&position)
    }
}

/// Apply `mark` at `position`, run `f` on the resulting state, then undo.
///
/// The undo runs whatever `f` returns, so nested probes always unwind in
/// stack order.
///
/// # Errors
///
/// Propagates the error from `apply_move` (nothing is undone in that case) or
/// from `undo_move`.
pub fn probe<T>(
    state: &mut dyn GameState,
    position: usize,
    mark: Mark,
    f: impl FnOnce(&mut dyn GameState) -> T,
) -> Result<T> {
    state.apply_move(position, mark)?;
    let value = f(state);
    state.undo_move(position)?;
    Ok(value)
}
