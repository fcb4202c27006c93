//! Agents for two-player board games
//!
//! This crate provides:
//! - Tic-Tac-Toe and Connect-4 behind one mutable [`game::GameState`] contract
//!   with apply/undo exploration
//! - A line-window heuristic evaluator
//! - Random, rule-based and minimax (alpha-beta) agents
//! - A tabular Q-learning agent with self-play training
//! - Game and match-series orchestration with pluggable observers

pub mod agents;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod utils;

pub use error::{Error, Result};
