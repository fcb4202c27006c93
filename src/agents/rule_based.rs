//! One-ply rule-based opponent
//!
//! This agent will:
//! 1. Play any move that wins immediately
//! 2. Otherwise block a move that would let the opponent win immediately
//! 3. Otherwise play randomly
//!
//! Candidates are scanned in ascending move order and the first hit is played.

use rand::rngs::StdRng;

use crate::{
    Result,
    game::{GameState, Mark, probe},
    ports::Agent,
    utils::{build_rng, choose_move},
};

/// Win-first, block-second, otherwise random
pub struct RuleBasedAgent {
    mark: Mark,
    name: String,
    rng: StdRng,
}

impl RuleBasedAgent {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            name: format!("Rules-{mark}"),
            rng: build_rng(None),
        }
    }

    /// Create a rule-based agent with a deterministic seed
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
            ..Self::new(mark)
        }
    }

    /// First legal move that completes a line for `mark`, if any
    fn find_winning_move(
        state: &mut dyn GameState,
        moves: &[usize],
        mark: Mark,
    ) -> Result<Option<usize>> {
        for &mv in moves {
            if probe(state, mv, mark, |s| s.winner_at(mv, mark))? {
                return Ok(Some(mv));
            }
        }
        Ok(None)
    }
}

impl Agent for RuleBasedAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn select_move(&mut self, state: &mut dyn GameState) -> Result<usize> {
        let moves = state.available_moves();

        if let Some(mv) = Self::find_winning_move(state, &moves, self.mark)? {
            return Ok(mv);
        }
        if let Some(mv) = Self::find_winning_move(state, &moves, self.mark.opponent())? {
            return Ok(mv);
        }

        choose_move(&moves, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ConnectFour, TicTacToe};

    #[test]
    fn takes_the_win() {
        // X X .
        // O O .
        // . . .
        let mut board = TicTacToe::from_string("XX.OO....").unwrap();
        let mut agent = RuleBasedAgent::with_seed(Mark::O, 1);
        // Winning at 5 beats blocking at 2
        assert_eq!(agent.select_move(&mut board).unwrap(), 5);
        assert_eq!(board.serialized_state(), "XX.OO....");
    }

    #[test]
    fn lowest_winning_move_first() {
        // O O .
        // O X X
        // . . X
        let mut board = TicTacToe::from_string("OO.OXX..X").unwrap();
        let mut agent = RuleBasedAgent::with_seed(Mark::O, 1);
        assert_eq!(agent.select_move(&mut board).unwrap(), 2);
    }

    #[test]
    fn blocks_the_opponent() {
        let mut agent = RuleBasedAgent::with_seed(Mark::O, 9);

        let mut threatened = TicTacToe::from_string("XX..O....").unwrap();
        assert_eq!(agent.select_move(&mut threatened).unwrap(), 2);
        assert_eq!(threatened.terminal_winner(), None);

        // No immediate win for either side: any legal move will do
        let mut quiet = TicTacToe::from_string("X...X...O").unwrap();
        let mv = agent.select_move(&mut quiet).unwrap();
        assert!(quiet.is_legal(mv));
    }

    #[test]
    fn blocks_connect_four_column() {
        let mut board = ConnectFour::new();
        for _ in 0..3 {
            board.apply_move(5, Mark::X).unwrap();
        }
        board.apply_move(0, Mark::O).unwrap();
        let before = board.serialized_state();

        let mut agent = RuleBasedAgent::with_seed(Mark::O, 4);
        assert_eq!(agent.select_move(&mut board).unwrap(), 5);
        assert_eq!(board.serialized_state(), before);
    }
}
