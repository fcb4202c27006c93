//! Match series between two agents

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::play::play_numbered_game;
use crate::{
    Error, Result,
    game::{GameKind, GameOutcome, Mark},
    ports::{Agent, Observer},
};

/// Series configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Number of games to play
    pub games: usize,

    /// Random seed handed to both agents before the first game
    pub seed: Option<u64>,

    /// Swap the first mover after every game; otherwise X always opens
    pub alternate_first: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            alternate_first: false,
        }
    }
}

/// Result of a match series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub game: GameKind,

    /// Name of the agent playing X
    pub x_agent: String,

    /// Name of the agent playing O
    pub o_agent: String,

    /// Total games played
    pub games: usize,

    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
}

impl SeriesResult {
    pub fn new(
        game: GameKind,
        x_agent: impl Into<String>,
        o_agent: impl Into<String>,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
    ) -> Self {
        let games = x_wins + o_wins + draws;
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };

        Self {
            game,
            x_agent: x_agent.into(),
            o_agent: o_agent.into(),
            games,
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins),
            o_win_rate: rate(o_wins),
            draw_rate: rate(draws),
        }
    }

    /// Wins recorded for `mark`
    pub fn wins_for(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays a series of games between two agents on fresh boards
pub struct MatchSeries<'a> {
    config: SeriesConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> MatchSeries<'a> {
    pub fn new(config: SeriesConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the series
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Run the series with `x_agent` playing X and `o_agent` playing O
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the agents do not hold X and
    /// O respectively, and propagates the first error raised by a game.
    #[instrument(skip(self, x_agent, o_agent), fields(games = self.config.games))]
    pub fn run(
        &mut self,
        game: GameKind,
        x_agent: &mut dyn Agent,
        o_agent: &mut dyn Agent,
    ) -> Result<SeriesResult> {
        if x_agent.mark() != Mark::X || o_agent.mark() != Mark::O {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "series expects an X and an O agent, got '{}' ({}) and '{}' ({})",
                    x_agent.name(),
                    x_agent.mark(),
                    o_agent.name(),
                    o_agent.mark()
                ),
            });
        }
        self.seed_pair(x_agent, o_agent)?;

        for observer in &mut self.observers {
            observer.on_series_start(self.config.games)?;
        }

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;

        for game_num in 0..self.config.games {
            let mut state = game.new_state();
            let x_opens = !self.config.alternate_first || game_num.is_multiple_of(2);

            let outcome = if x_opens {
                play_numbered_game(
                    game_num,
                    state.as_mut(),
                    x_agent,
                    o_agent,
                    &mut self.observers,
                )?
            } else {
                play_numbered_game(
                    game_num,
                    state.as_mut(),
                    o_agent,
                    x_agent,
                    &mut self.observers,
                )?
            };

            match outcome {
                GameOutcome::Win(Mark::X) => x_wins += 1,
                GameOutcome::Win(Mark::O) => o_wins += 1,
                GameOutcome::Draw => draws += 1,
            }
        }

        for observer in &mut self.observers {
            observer.on_series_end()?;
        }

        let result = SeriesResult::new(
            game,
            x_agent.name(),
            o_agent.name(),
            x_wins,
            o_wins,
            draws,
        );
        info!(
            %game,
            x = %result.x_agent,
            o = %result.o_agent,
            x_wins,
            o_wins,
            draws,
            "series complete"
        );
        Ok(result)
    }

    fn seed_pair(&self, x_agent: &mut dyn Agent, o_agent: &mut dyn Agent) -> Result<()> {
        if let Some(seed) = self.config.seed {
            x_agent.set_rng_seed(seed)?;
            o_agent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}
