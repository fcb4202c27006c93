//! Result of a finished game

use serde::{Deserialize, Serialize};

use super::cell::Mark;

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Mark),
    Draw,
}

impl GameOutcome {
    /// Winning mark, if the game was not drawn
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::Win(mark) => Some(mark),
            GameOutcome::Draw => None,
        }
    }

    /// Reward from `mark`'s perspective: +1 win, -1 loss, 0 draw
    pub fn reward_for(self, mark: Mark) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == mark => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}
