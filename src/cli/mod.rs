//! CLI infrastructure for the boardbots harness
//!
//! This module provides the command-line interface for playing single games,
//! running match series and training Q-learning agents.

pub mod commands;
pub mod config;
pub mod output;
