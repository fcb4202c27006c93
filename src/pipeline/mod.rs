//! Orchestration: single games, match series and their observers
//!
//! This module provides:
//! - [`play_game`] for one game between two agents on a caller-owned state
//! - [`MatchSeries`] for repeated games with aggregate results
//! - Observer adapters for progress bars, metrics and verbose boards

pub mod observers;
pub mod play;
pub mod series;

pub use observers::{BoardPrinter, MetricsObserver, MetricsSummary, ProgressObserver};
pub use play::play_game;
pub use series::{MatchSeries, SeriesConfig, SeriesResult};

pub use crate::ports::{Agent, Observer};
