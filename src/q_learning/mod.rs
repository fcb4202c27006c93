//! Tabular Q-learning
//!
//! A [`QLearningAgent`] picks moves epsilon-greedily from a [`QTable`] keyed by
//! `(serialized_state, move)` and improves it with the off-policy TD update
//!
//! ```text
//! Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))
//! ```
//!
//! Training plays the learner against a built-in opponent chosen by
//! [`TrainingOpponent`], or against any [`crate::ports::Agent`] through
//! [`QLearningAgent::train_against`].
//!
//! ## Usage Example
//!
//! ```no_run
//! use boardbots::game::{GameKind, Mark};
//! use boardbots::q_learning::{QLearningAgent, QLearningConfig, TrainingOpponent};
//!
//! let config = QLearningConfig::default()
//!     .with_epsilon(0.2)
//!     .with_opponent(TrainingOpponent::SharedTable);
//! let mut agent = QLearningAgent::new(Mark::X, config).with_seed(7);
//! agent.train(GameKind::TicTacToe, 10_000)?;
//! agent.set_epsilon(0.0);
//! # Ok::<(), boardbots::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
mod training;

pub use agent::QLearningAgent;
pub use config::{QLearningConfig, TrainingOpponent};
pub use q_table::{QTable, SharedQTable};
