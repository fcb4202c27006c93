//! Epsilon-greedy Q-learning agent
//!
//! Values are keyed by the serialized position the agent moved from and the
//! move it played. The table sits behind a [`SharedQTable`] handle so that a
//! training opponent can read the same values the learner is updating.

use std::sync::MutexGuard;

use rand::{Rng, rngs::StdRng};

use crate::{
    Error, Result,
    game::{GameState, Mark},
    ports::Agent,
    q_learning::{
        config::QLearningConfig,
        q_table::{QTable, SharedQTable},
    },
    utils::{build_rng, choose_move},
};

/// Tabular Q-learning agent (off-policy TD control)
pub struct QLearningAgent {
    pub(super) mark: Mark,
    pub(super) name: String,
    pub(super) table: SharedQTable,
    pub(super) config: QLearningConfig,
    pub(super) epsilon: f64,
    pub(super) rng: StdRng,
}

pub(super) fn lock_table<'a>(
    table: &'a SharedQTable,
    owner: &str,
) -> Result<MutexGuard<'a, QTable>> {
    table.lock().map_err(|_| Error::SharedTableLock {
        owner: owner.to_string(),
    })
}

impl QLearningAgent {
    /// Create an agent with its own empty table
    pub fn new(mark: Mark, config: QLearningConfig) -> Self {
        let table = QTable::new(config.learning_rate, config.discount_factor, config.q_init);
        Self::with_shared_table(mark, config, table.into_shared())
    }

    /// Create an agent that reads and updates `table`
    ///
    /// The table keeps the learning rate and discount it was built with;
    /// only the exploration settings of `config` apply to this agent.
    pub fn with_shared_table(mark: Mark, config: QLearningConfig, table: SharedQTable) -> Self {
        Self {
            mark,
            name: format!("QLearning-{mark}"),
            table,
            epsilon: config.epsilon,
            config,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    /// Handle to the underlying table
    pub fn table(&self) -> SharedQTable {
        SharedQTable::clone(&self.table)
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override the exploration rate, e.g. to play greedily after training
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Number of state-move pairs learned so far
    ///
    /// # Errors
    ///
    /// Returns [`Error::SharedTableLock`] if another holder of the table
    /// panicked while updating it.
    pub fn table_size(&self) -> Result<usize> {
        Ok(lock_table(&self.table, &self.name)?.size())
    }

    /// Apply one TD update for playing `mv` from `prior_state`
    ///
    /// `new_state` is the position reached afterwards. Its best value is
    /// bootstrapped unless it is terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SharedTableLock`] if the table is poisoned.
    pub fn update_table(
        &self,
        prior_state: &str,
        new_state: &dyn GameState,
        mv: usize,
        reward: f64,
    ) -> Result<()> {
        let done = new_state.is_terminal();
        let next_key = new_state.serialized_state();
        let next_moves = new_state.available_moves();

        lock_table(&self.table, &self.name)?.q_learning_update(
            prior_state,
            mv,
            reward,
            &next_key,
            &next_moves,
            done,
        );
        Ok(())
    }

    pub(super) fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }
}

impl Agent for QLearningAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn select_move(&mut self, state: &mut dyn GameState) -> Result<usize> {
        let legal_moves = state.available_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        if self.rng.random::<f64>() < self.epsilon {
            return choose_move(&legal_moves, &mut self.rng);
        }

        let key = state.serialized_state();
        let greedy = lock_table(&self.table, &self.name)?.greedy_actions(&key, &legal_moves);
        choose_move(&greedy, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }
}
