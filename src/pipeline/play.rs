//! Single-game orchestration loop

use tracing::{debug, warn};

use crate::{
    Error, Result,
    game::{GameOutcome, GameState},
    ports::{Agent, Observer},
};

/// Play one game on `state`, starting with `first`.
///
/// Agents alternate until a line is completed or the board fills. Every move
/// is checked for legality before it is committed, and observers see the board
/// after each commit.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if both agents hold the same mark,
/// [`Error::ContractViolation`] if an agent returns a move that is not legal
/// in the current position, and propagates agent and observer errors.
pub fn play_game(
    state: &mut dyn GameState,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    observers: &mut [Box<dyn Observer + '_>],
) -> Result<GameOutcome> {
    play_numbered_game(0, state, first, second, observers)
}

pub(crate) fn play_numbered_game(
    game_num: usize,
    state: &mut dyn GameState,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    observers: &mut [Box<dyn Observer + '_>],
) -> Result<GameOutcome> {
    if first.mark() == second.mark() {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "'{}' and '{}' both play {}",
                first.name(),
                second.name(),
                first.mark()
            ),
        });
    }

    for observer in observers.iter_mut() {
        observer.on_game_start(game_num)?;
    }

    let mut step_num: usize = 0;
    while !state.is_terminal() {
        let agent: &mut dyn Agent = if step_num.is_multiple_of(2) {
            &mut *first
        } else {
            &mut *second
        };

        let position = agent.select_move(state)?;
        if !state.is_legal(position) {
            warn!(agent = agent.name(), position, "agent returned an illegal move");
            return Err(Error::ContractViolation {
                agent: agent.name().to_string(),
                position,
                reason: format!("not one of {:?}", state.available_moves()),
            });
        }

        let mark = agent.mark();
        state.apply_move(position, mark)?;

        for observer in observers.iter_mut() {
            observer.on_move(game_num, step_num, mark, position, state)?;
        }
        step_num += 1;
    }

    let outcome = state
        .terminal_winner()
        .map_or(GameOutcome::Draw, GameOutcome::Win);
    debug!(game_num, moves = step_num, ?outcome, "game finished");

    for observer in observers.iter_mut() {
        observer.on_game_end(game_num, outcome)?;
    }
    Ok(outcome)
}
