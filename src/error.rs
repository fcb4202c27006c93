//! Error types for the boardbots crate

use thiserror::Error;

use crate::game::GameKind;

/// Main error type for the boardbots crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move on {game}: location {position} is not playable")]
    IllegalMove { game: GameKind, position: usize },

    #[error("move {position} is out of range for {game} (must be below {limit})")]
    MoveOutOfRange {
        game: GameKind,
        position: usize,
        limit: usize,
    },

    #[error("cannot undo move {position} on {game}: location is empty")]
    NothingToUndo { game: GameKind, position: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("agent '{agent}' returned move {position}: {reason}")]
    ContractViolation {
        agent: String,
        position: usize,
        reason: String,
    },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid agent '{input}'. Expected one of: {expected}")]
    ParseAgentSpec { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("value table shared by '{owner}' is poisoned")]
    SharedTableLock { owner: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
