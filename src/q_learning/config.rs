//! Q-learning hyperparameters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Who the learner plays against during [`super::QLearningAgent::train`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingOpponent {
    /// A greedy agent reading the learner's own table
    SharedTable,
    /// An agent with a private table that never learns
    #[default]
    IsolatedTable,
}

impl fmt::Display for TrainingOpponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingOpponent::SharedTable => write!(f, "shared"),
            TrainingOpponent::IsolatedTable => write!(f, "isolated"),
        }
    }
}

/// Hyperparameters of a [`super::QLearningAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay applied after every training episode
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    /// Value of state-move pairs that were never updated
    pub q_init: f64,
    pub opponent: TrainingOpponent,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.3,
            discount_factor: 0.9,
            epsilon: 0.1,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            q_init: 0.0,
            opponent: TrainingOpponent::default(),
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_opponent(mut self, opponent: TrainingOpponent) -> Self {
        self.opponent = opponent;
        self
    }

    /// Check every rate lies in its valid range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let unit_interval = [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.learning_rate == 0.0 {
            return Err(Error::InvalidConfiguration {
                message: "learning_rate must be positive".to_string(),
            });
        }
        if !self.q_init.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("q_init must be finite, got {}", self.q_init),
            });
        }
        Ok(())
    }
}
