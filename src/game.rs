//! Board games: the shared game-state contract and its two variants

pub mod cell;
pub mod connect_four;
pub mod lines;
pub mod outcome;
pub mod state;
pub mod tictactoe;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cell::{Cell, Mark};
pub use connect_four::ConnectFour;
pub use lines::{LineWindows, TICTACTOE_LINES, Window};
pub use outcome::GameOutcome;
pub use state::{GameState, probe};
pub use tictactoe::TicTacToe;

/// Which board game a state belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    ConnectFour,
}

impl GameKind {
    /// Create a fresh, empty state for this game
    pub fn new_state(self) -> Box<dyn GameState> {
        match self {
            GameKind::TicTacToe => Box::new(TicTacToe::new()),
            GameKind::ConnectFour => Box::new(ConnectFour::new()),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::TicTacToe => write!(f, "Tic-Tac-Toe"),
            GameKind::ConnectFour => write!(f, "Connect-4"),
        }
    }
}
