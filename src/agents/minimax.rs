//! Depth-limited minimax search with alpha-beta pruning
//!
//! The search explores a single shared [`GameState`]: every candidate move is
//! applied, searched one ply deeper with the roles swapped, and undone before
//! the next candidate. Scores are always from the searching agent's
//! perspective:
//!
//! - a finished game scores `±(empty cells + 1)`, so faster wins and slower
//!   losses are preferred
//! - a full board without a winner scores 0
//! - positions at the depth limit are scored by the [`HeuristicEvaluator`]

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    game::{GameState, Mark, probe},
    heuristic::{HeuristicEvaluator, HeuristicWeights},
    ports::Agent,
    utils::{build_rng, choose_move},
};

/// Search depth used when none is configured
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Best move found by a search together with its backed-up score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// `None` only for positions that were scored without expanding moves
    pub best_move: Option<usize>,
    pub score: i32,
}

impl SearchOutcome {
    fn leaf(score: i32) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

/// Minimax agent with alpha-beta pruning
pub struct SearchAgent {
    mark: Mark,
    name: String,
    depth: usize,
    evaluator: HeuristicEvaluator,
    rng: StdRng,
    nodes: u64,
}

impl SearchAgent {
    pub fn new(mark: Mark, depth: usize) -> Self {
        Self {
            mark,
            name: format!("Minimax{depth}-{mark}"),
            depth,
            evaluator: HeuristicEvaluator::default(),
            rng: build_rng(None),
            nodes: 0,
        }
    }

    pub fn with_heuristic(mut self, weights: HeuristicWeights) -> Self {
        self.evaluator = HeuristicEvaluator::new(weights);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run a full minimax search from `state` with this agent to move.
    ///
    /// Unlike [`Agent::select_move`], this always searches, even on an empty
    /// board. The root is always expanded, so a depth of 0 searches one ply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if `state` has no legal moves.
    pub fn search(&mut self, state: &mut dyn GameState) -> Result<SearchOutcome> {
        if state.available_moves().is_empty() {
            return Err(Error::NoValidMoves);
        }
        self.nodes = 0;
        self.minimax(state, self.mark, self.depth.max(1), i32::MIN, i32::MAX)
    }

    fn minimax(
        &mut self,
        state: &mut dyn GameState,
        player: Mark,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<SearchOutcome> {
        self.nodes += 1;

        if let Some(winner) = state.terminal_winner() {
            let magnitude = state.empty_cell_count() as i32 + 1;
            let score = if winner == self.mark {
                magnitude
            } else {
                -magnitude
            };
            return Ok(SearchOutcome::leaf(score));
        }
        if state.is_full() {
            return Ok(SearchOutcome::leaf(0));
        }
        if depth == 0 {
            return Ok(SearchOutcome::leaf(self.evaluator.evaluate(state, self.mark)));
        }

        let maximizing = player == self.mark;
        let mut best = SearchOutcome::leaf(if maximizing { i32::MIN } else { i32::MAX });

        for mv in state.available_moves() {
            let child = probe(state, mv, player, |s| {
                self.minimax(s, player.opponent(), depth - 1, alpha, beta)
            })??;

            if maximizing {
                if best.best_move.is_none() || child.score > best.score {
                    best = SearchOutcome {
                        best_move: Some(mv),
                        score: child.score,
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if best.best_move.is_none() || child.score < best.score {
                    best = SearchOutcome {
                        best_move: Some(mv),
                        score: child.score,
                    };
                }
                beta = beta.min(best.score);
            }

            if alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}

impl Agent for SearchAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn select_move(&mut self, state: &mut dyn GameState) -> Result<usize> {
        // Every opening is symmetric enough that a full search buys nothing
        if state.is_empty_board() {
            return choose_move(&state.available_moves(), &mut self.rng);
        }

        let outcome = self.search(state)?;
        debug!(
            agent = %self.name,
            best_move = ?outcome.best_move,
            score = outcome.score,
            nodes = self.nodes,
            "search finished"
        );
        outcome.best_move.ok_or(Error::NoValidMoves)
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
    fn finds_immediate_win() {
        let mut board = TicTacToe::from_string("XX.OO....").unwrap();
        let mut agent = SearchAgent::new(Mark::X, 9);
        let outcome = agent.search(&mut board).unwrap();

        assert_eq!(outcome.best_move, Some(2));
        // Win with 4 empty cells left
        assert_eq!(outcome.score, 5);
        assert_eq!(board.serialized_state(), "XX.OO....");
        assert_eq!(board.terminal_winner(), None);
    }

    #[test]
    fn blocks_when_it_cannot_win() {
        // X to move, O threatens the middle row
        let mut board = TicTacToe::from_string("X..OO...X").unwrap();
        let mut agent = SearchAgent::new(Mark::X, 9);
        assert_eq!(agent.select_move(&mut board).unwrap(), 5);
    }

    #[test]
    fn as_o_takes_the_win() {
        let mut board = TicTacToe::from_string("XX.OO...X").unwrap();
        let mut agent = SearchAgent::new(Mark::O, 9);
        assert_eq!(agent.select_move(&mut board).unwrap(), 5);
    }

    #[test]
    fn lost_position_scores_negative() {
        // O threatens both 2 and 6; X can only block one
        let mut board = TicTacToe::from_string("OO.OXX...").unwrap();
        let mut agent = SearchAgent::new(Mark::X, 9);
        let outcome = agent.search(&mut board).unwrap();
        assert!(outcome.score < 0, "score {}", outcome.score);
    }

    #[test]
    fn depth_zero_still_expands_the_root() {
        let mut board = TicTacToe::from_string("X........").unwrap();
        let mut agent = SearchAgent::new(Mark::O, 0).with_seed(2);

        let mv = agent.select_move(&mut board).unwrap();
        assert!(board.is_legal(mv));
        assert_eq!(board.serialized_state(), "X........");
    }

    #[test]
    fn depth_one_scores_children_with_heuristic() {
        // Taking 8 completes the diagonal; every other reply leaves a leaf
        let mut board = TicTacToe::from_string("X...X....").unwrap();
        let mut agent = SearchAgent::new(Mark::X, 1);
        let outcome = agent.search(&mut board).unwrap();
        assert_eq!(outcome.best_move, Some(8));
        assert_eq!(outcome.score, 7);
    }

    #[test]
    fn full_board_is_a_contract_violation() {
        let mut board = TicTacToe::from_string("XOXXOOOXX").unwrap();
        let mut agent = SearchAgent::new(Mark::X, 3);
        assert!(matches!(agent.search(&mut board), Err(Error::NoValidMoves)));
    }

    #[test]
    fn empty_board_opens_randomly() {
        let mut board = TicTacToe::new();
        let mut agent = SearchAgent::new(Mark::X, 9).with_seed(5);
        let mv = agent.select_move(&mut board).unwrap();
        assert!(mv < 9);
        assert!(board.is_empty_board());
    }

    #[test]
    fn connect_four_completes_a_column() {
        let mut board = ConnectFour::new();
        for _ in 0..3 {
            board.apply_move(2, Mark::O).unwrap();
            board.apply_move(4, Mark::X).unwrap();
        }
        let before = board.serialized_state();

        let mut agent = SearchAgent::new(Mark::O, DEFAULT_SEARCH_DEPTH);
        assert_eq!(agent.select_move(&mut board).unwrap(), 2);
        assert_eq!(board.serialized_state(), before);
    }

    #[test]
    fn connect_four_blocks_a_column() {
        let mut board = ConnectFour::new();
        for _ in 0..3 {
            board.apply_move(4, Mark::X).unwrap();
        }
        board.apply_move(0, Mark::O).unwrap();
        board.apply_move(1, Mark::O).unwrap();

        let mut agent = SearchAgent::new(Mark::O, DEFAULT_SEARCH_DEPTH);
        assert_eq!(agent.select_move(&mut board).unwrap(), 4);
    }
}
