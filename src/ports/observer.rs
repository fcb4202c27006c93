//! Observer port - hooks for watching games and match series
//!
//! Observers let callers collect progress, metrics or board renderings without
//! coupling the orchestration loop to any output format.

use crate::{
    Result,
    game::{GameOutcome, GameState, Mark},
};

/// Observer trait for monitoring play
///
/// Methods are called in this order:
/// 1. `on_series_start(total_games)` - once, when a series begins
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - after every committed move
///    - `on_game_end(game_num, outcome)`
/// 3. `on_series_end()` - once at the end
///
/// Single games played outside a series skip steps 1 and 3.
///
/// # Examples
///
/// ```
/// use boardbots::{game::GameOutcome, ports::Observer};
///
/// struct GameCounter {
///     finished: usize,
/// }
///
/// impl Observer for GameCounter {
///     fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> boardbots::Result<()> {
///         self.finished += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_series_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been committed.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Move number within the game (0-based)
    /// * `mark` - Mark that moved
    /// * `position` - Move identifier that was played
    /// * `state` - Board after the move
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _mark: Mark,
        _position: usize,
        _state: &dyn GameState,
    ) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once a series completes. Use this to finalize outputs.
    fn on_series_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller lend an observer to a series and read it back afterwards
impl<T: Observer + ?Sized> Observer for &mut T {
    fn on_series_start(&mut self, total_games: usize) -> Result<()> {
        (**self).on_series_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        (**self).on_game_start(game_num)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        mark: Mark,
        position: usize,
        state: &dyn GameState,
    ) -> Result<()> {
        (**self).on_move(game_num, step_num, mark, position, state)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        (**self).on_game_end(game_num, outcome)
    }

    fn on_series_end(&mut self) -> Result<()> {
        (**self).on_series_end()
    }
}
