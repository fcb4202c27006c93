//! Shared argument types for CLI commands

use clap::ValueEnum;

use crate::{game::GameKind, q_learning::TrainingOpponent};

/// Board game selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameArg {
    #[value(name = "tictactoe", alias = "ttt")]
    TicTacToe,
    #[value(name = "connect4", alias = "c4")]
    ConnectFour,
}

impl From<GameArg> for GameKind {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::TicTacToe => GameKind::TicTacToe,
            GameArg::ConnectFour => GameKind::ConnectFour,
        }
    }
}

/// Built-in training opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    /// Greedy player reading the learner's own table
    Shared,
    /// Player with a private table that never learns
    Isolated,
}

impl From<OpponentArg> for TrainingOpponent {
    fn from(arg: OpponentArg) -> Self {
        match arg {
            OpponentArg::Shared => TrainingOpponent::SharedTable,
            OpponentArg::Isolated => TrainingOpponent::IsolatedTable,
        }
    }
}
