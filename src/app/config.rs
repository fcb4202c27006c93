//! Configuration types for agent creation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    agents::DEFAULT_SEARCH_DEPTH,
    heuristic::HeuristicWeights,
    q_learning::QLearningConfig,
};

const EXPECTED_AGENTS: &str =
    "random, rules, minimax, minimax:<depth ≥ 1>, qlearning, qlearning:<training episodes>";

/// Which strategy an agent plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentSpec {
    Random,
    RuleBased,
    Minimax {
        depth: usize,
        #[serde(default)]
        weights: HeuristicWeights,
    },
    QLearning {
        #[serde(default)]
        config: QLearningConfig,
        /// Self-play episodes run before the agent is handed out
        #[serde(default)]
        episodes: usize,
    },
}

impl AgentSpec {
    pub fn minimax(depth: usize) -> Self {
        AgentSpec::Minimax {
            depth,
            weights: HeuristicWeights::default(),
        }
    }

    pub fn q_learning(config: QLearningConfig, episodes: usize) -> Self {
        AgentSpec::QLearning { config, episodes }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentSpec::Random => write!(f, "random"),
            AgentSpec::RuleBased => write!(f, "rules"),
            AgentSpec::Minimax { depth, .. } => write!(f, "minimax:{depth}"),
            AgentSpec::QLearning { episodes: 0, .. } => write!(f, "qlearning"),
            AgentSpec::QLearning { episodes, .. } => write!(f, "qlearning:{episodes}"),
        }
    }
}

impl FromStr for AgentSpec {
    type Err = Error;

    /// Parse a command-line agent token such as `minimax:6`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::ParseAgentSpec {
            input: s.to_string(),
            expected: EXPECTED_AGENTS.to_string(),
        };
        let token = s.trim().to_ascii_lowercase();
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (token.as_str(), None),
        };

        match (name, arg) {
            ("random", None) => Ok(AgentSpec::Random),
            ("rules" | "rule-based", None) => Ok(AgentSpec::RuleBased),
            ("minimax", None) => Ok(AgentSpec::minimax(DEFAULT_SEARCH_DEPTH)),
            ("minimax", Some(depth)) => match depth.parse() {
                Ok(depth) if depth > 0 => Ok(AgentSpec::minimax(depth)),
                _ => Err(invalid()),
            },
            ("qlearning" | "q-learning", None) => {
                Ok(AgentSpec::q_learning(QLearningConfig::default(), 0))
            }
            ("qlearning" | "q-learning", Some(episodes)) => episodes
                .parse()
                .map(|episodes| AgentSpec::q_learning(QLearningConfig::default(), episodes))
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

/// Configuration for creating an agent.
///
/// # Examples
///
/// ```
/// use boardbots::app::{AgentConfig, AgentSpec};
///
/// let config = AgentConfig::new("minimax:6".parse()?).with_seed(42);
/// assert_eq!(config.spec, AgentSpec::minimax(6));
/// # Ok::<(), boardbots::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub spec: AgentSpec,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new(spec: AgentSpec) -> Self {
        Self { spec, seed: None }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(AgentSpec::Random)
    }
}
