//! Observer adapters for games and match series
//!
//! Observers allow composable data collection during play without coupling
//! the orchestration loop to specific output formats.

use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{GameOutcome, GameState, Mark},
    ports::Observer,
};

/// Progress observer - Displays a progress bar with running results
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_series_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Mark::X) => self.x_wins += 1,
            GameOutcome::Win(Mark::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_series_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks results and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    /// Share of finished games won by `mark`
    pub fn win_rate(&self, mark: Mark) -> f64 {
        match mark {
            Mark::X => self.rate(self.x_wins),
            Mark::O => self.rate(self.o_wins),
        }
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.win_rate(Mark::X),
            o_win_rate: self.win_rate(Mark::O),
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Snapshot of [`MetricsObserver`] counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _mark: Mark,
        _position: usize,
        _state: &dyn GameState,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(Mark::X) => self.x_wins += 1,
            GameOutcome::Win(Mark::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        Ok(())
    }
}

/// Writes the board after every committed move, then the result
pub struct BoardPrinter<W: Write + Send = io::Stdout> {
    out: W,
}

impl BoardPrinter {
    /// Print to standard output
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> BoardPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_failed(source: io::Error) -> Error {
    Error::Io {
        operation: "write board".to_string(),
        source,
    }
}

impl<W: Write + Send> Observer for BoardPrinter<W> {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        mark: Mark,
        position: usize,
        state: &dyn GameState,
    ) -> Result<()> {
        writeln!(self.out, "{mark} makes a move to square {position}").map_err(write_failed)?;
        writeln!(self.out, "{}", state.render()).map_err(write_failed)?;
        writeln!(self.out).map_err(write_failed)
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(mark) => writeln!(self.out, "{mark} wins!"),
            GameOutcome::Draw => writeln!(self.out, "It's a tie!"),
        }
        .map_err(write_failed)
    }
}
