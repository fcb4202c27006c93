//! Agent factory for the application layer.
//!
//! The container owns application-wide defaults and turns an [`AgentConfig`]
//! into a ready-to-play agent behind the [`Agent`] port.

use tracing::debug;

use super::config::{AgentConfig, AgentSpec};
use crate::{
    Error, Result,
    agents::{RandomAgent, RuleBasedAgent, SearchAgent},
    game::{GameKind, Mark},
    ports::Agent,
    q_learning::QLearningAgent,
};

/// Application with a shared default seed.
///
/// # Examples
///
/// ```
/// use boardbots::app::{AgentConfig, AgentSpec, App};
/// use boardbots::game::{GameKind, Mark};
///
/// let app = App::new().with_default_seed(42);
/// let agent = app.create_agent(&AgentConfig::new(AgentSpec::RuleBased), Mark::O, GameKind::TicTacToe)?;
/// assert_eq!(agent.name(), "Rules-O");
/// # Ok::<(), boardbots::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed used for agents whose config carries none
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Create an agent playing `mark` in `game`.
    ///
    /// The seed comes from `config` or the app default, offset per mark so the
    /// two sides of a game never share a random stream. Q-learning specs with
    /// a positive episode count are trained on `game` before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero search depth or
    /// out-of-range Q-learning rates, and propagates training errors.
    pub fn create_agent(
        &self,
        config: &AgentConfig,
        mark: Mark,
        game: GameKind,
    ) -> Result<Box<dyn Agent>> {
        let seed = config
            .seed
            .or(self.default_seed)
            .map(|seed| match mark {
                Mark::X => seed,
                Mark::O => seed.wrapping_add(1),
            });

        let agent: Box<dyn Agent> = match &config.spec {
            AgentSpec::Random => Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(mark, seed),
                None => RandomAgent::new(mark),
            }),
            AgentSpec::RuleBased => Box::new(match seed {
                Some(seed) => RuleBasedAgent::with_seed(mark, seed),
                None => RuleBasedAgent::new(mark),
            }),
            AgentSpec::Minimax { depth: 0, .. } => {
                return Err(Error::InvalidConfiguration {
                    message: "minimax depth must be at least 1".to_string(),
                });
            }
            AgentSpec::Minimax { depth, weights } => {
                let agent = SearchAgent::new(mark, *depth).with_heuristic(*weights);
                Box::new(match seed {
                    Some(seed) => agent.with_seed(seed),
                    None => agent,
                })
            }
            AgentSpec::QLearning {
                config: q_config,
                episodes,
            } => {
                q_config.validate()?;
                let mut agent = QLearningAgent::new(mark, *q_config);
                if let Some(seed) = seed {
                    agent = agent.with_seed(seed);
                }
                if *episodes > 0 {
                    agent.train(game, *episodes)?;
                }
                Box::new(agent)
            }
        };

        debug!(agent = agent.name(), spec = %config.spec, ?seed, "created agent");
        Ok(agent)
    }
}
