//! Common test utilities for the boardbots test suite.

#![allow(dead_code)]

use boardbots::{
    Result,
    app::{AgentConfig, AgentSpec, App},
    game::{GameKind, GameState, Mark},
    ports::Agent,
};

/// Build a seeded agent from a command-line token such as `minimax:9`.
pub fn seeded_agent(token: &str, mark: Mark, game: GameKind, seed: u64) -> Box<dyn Agent> {
    let spec: AgentSpec = token.parse().unwrap();
    App::new()
        .create_agent(&AgentConfig::new(spec).with_seed(seed), mark, game)
        .unwrap()
}

/// Drive `state` through `moves`, alternating marks starting with `first`.
pub fn play_moves(state: &mut dyn GameState, first: Mark, moves: &[usize]) -> Result<()> {
    let mut mark = first;
    for &mv in moves {
        state.apply_move(mv, mark)?;
        mark = mark.opponent();
    }
    Ok(())
}

/// Agent that replays a fixed list of moves.
pub struct ScriptedAgent {
    mark: Mark,
    moves: Vec<usize>,
}

impl ScriptedAgent {
    pub fn new(mark: Mark, moves: &[usize]) -> Self {
        Self {
            mark,
            moves: moves.iter().rev().copied().collect(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn select_move(&mut self, _state: &mut dyn GameState) -> Result<usize> {
        self.moves.pop().ok_or(boardbots::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
