//! Non-learning agents: uniform random, rule-based and minimax search
//!
//! The Q-learning agent lives in [`crate::q_learning`].

pub mod minimax;
pub mod random;
pub mod rule_based;

pub use minimax::{DEFAULT_SEARCH_DEPTH, SearchAgent, SearchOutcome};
pub use random::RandomAgent;
pub use rule_based::RuleBasedAgent;
