//! Agent port - the move-selection capability shared by every strategy
//!
//! Strategies (random, rule-based, minimax search, Q-learning) are chosen at
//! construction time and used through this trait, so the orchestrator never
//! needs to know which one it is driving.

use crate::{
    Result,
    game::{GameState, Mark},
};

/// A player that picks moves for its mark
///
/// # Examples
///
/// ```
/// use boardbots::{
///     agents::RandomAgent,
///     game::{GameState, Mark, TicTacToe},
///     ports::Agent,
/// };
///
/// let mut agent = RandomAgent::with_seed(Mark::X, 7);
/// let mut board = TicTacToe::new();
/// let mv = agent.select_move(&mut board)?;
/// assert!(board.is_legal(mv));
/// # Ok::<(), boardbots::Error>(())
/// ```
pub trait Agent: Send {
    /// Mark this agent places on the board
    fn mark(&self) -> Mark;

    /// Select a move for the given state.
    ///
    /// Agents may simulate moves on `state` while deciding, but must leave it
    /// exactly as they found it. The returned move is committed by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when the state has no legal
    /// moves.
    fn select_move(&mut self, state: &mut dyn GameState) -> Result<usize>;

    /// Display name used in logs and reports
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Series runners call this when supplied with a deterministic seed.
    /// Agents without randomness can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
