//! Uniform random baseline

use rand::rngs::StdRng;

use crate::{
    Result,
    game::{GameState, Mark},
    ports::Agent,
    utils::{build_rng, choose_move},
};

/// Plays a uniformly random legal move
pub struct RandomAgent {
    mark: Mark,
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            name: format!("Random-{mark}"),
            rng: build_rng(None),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
            ..Self::new(mark)
        }
    }
}

impl Agent for RandomAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn select_move(&mut self, state: &mut dyn GameState) -> Result<usize> {
        choose_move(&state.available_moves(), &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }
}
