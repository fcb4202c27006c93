//! Tabular value store for Q-learning

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Handle to a table that several agents read and update
pub type SharedQTable = Arc<Mutex<QTable>>;

/// Q-table mapping (serialized state, move) pairs to Q-values
///
/// Pairs that were never updated read as the configured initial value. The
/// table only grows; entries are never evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (serialized_state, move) -> Q-value
    q_values: HashMap<(String, usize), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Initial Q-value for unseen state-move pairs
    q_init: f64,
}

impl QTable {
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    /// Wrap this table in a [`SharedQTable`] handle
    pub fn into_shared(self) -> SharedQTable {
        Arc::new(Mutex::new(self))
    }

    pub fn get(&self, state: &str, action: usize) -> f64 {
        self.q_values
            .get(&(state.to_string(), action))
            .copied()
            .unwrap_or(self.q_init)
    }

    pub fn set(&mut self, state: impl Into<String>, action: usize, value: f64) {
        self.q_values.insert((state.into(), action), value);
    }

    /// Whether `(state, action)` has been written, even with the initial value
    pub fn contains(&self, state: &str, action: usize) -> bool {
        self.q_values.contains_key(&(state.to_string(), action))
    }

    /// Maximum Q-value over `legal_actions`, or 0 when there are none
    pub fn max_q(&self, state: &str, legal_actions: &[usize]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// All legal actions sharing the highest Q-value, in the order given
    pub fn greedy_actions(&self, state: &str, legal_actions: &[usize]) -> Vec<usize> {
        let best = self.max_q(state, legal_actions);
        legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == best)
            .collect()
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The max term is 0 when `done` is set or `next_legal_actions` is empty.
    pub fn q_learning_update(
        &mut self,
        state: &str,
        action: usize,
        reward: f64,
        next_state: &str,
        next_legal_actions: &[usize],
        done: bool,
    ) -> f64 {
        let current_q = self.get(state, action);
        let max_next_q = if done {
            0.0
        } else {
            self.max_q(next_state, next_legal_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Forget every learned value
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Number of stored state-move pairs
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
