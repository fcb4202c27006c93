//! Static evaluation of non-terminal positions
//!
//! The evaluator counts line patterns for one player. Every straight window of
//! the game's win length is inspected: on Tic-Tac-Toe those are the three rows,
//! three columns and two diagonals, on Connect-4 every run of four cells.

use serde::{Deserialize, Serialize};

use crate::game::{GameState, LineWindows, Mark};

/// Scores assigned to line patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Three own marks and no opposing mark in a window
    pub complete: i32,
    /// Two own marks and no opposing mark in a window
    pub open_pair: i32,
    /// Three opposing marks and no own mark in a window (usually negative)
    pub opponent_complete: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            complete: 100,
            open_pair: 1,
            opponent_complete: -100,
        }
    }
}

/// Pattern-counting position evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> HeuristicWeights {
        self.weights
    }

    /// Score `state` from `mark`'s point of view
    pub fn evaluate(&self, state: &dyn GameState, mark: Mark) -> i32 {
        let (rows, cols) = state.dimensions();
        let own_cell = mark.to_cell();
        let opp_cell = mark.opponent().to_cell();

        LineWindows::all(rows, cols, state.win_length())
            .map(|window| {
                let mut own = 0;
                let mut opp = 0;
                for (row, col) in window.cells() {
                    match state.cell(row, col) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => {}
                    }
                }
                self.score_window(own, opp)
            })
            .sum()
    }

    fn score_window(&self, own: usize, opp: usize) -> i32 {
        match (own, opp) {
            (3, 0) => self.weights.complete,
            (2, 0) => self.weights.open_pair,
            (0, 3) => self.weights.opponent_complete,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ConnectFour, TicTacToe};

    #[test]
    fn empty_board_scores_zero() {
        let eval = HeuristicEvaluator::default();
        assert_eq!(eval.evaluate(&TicTacToe::new(), Mark::X), 0);
        assert_eq!(eval.evaluate(&ConnectFour::new(), Mark::O), 0);
    }

    #[test]
    fn open_pairs_count_once_per_line() {
        // X at 0 and 4: the main diagonal is an open pair
        let board = TicTacToe::from_string("X...X....").unwrap();
        assert_eq!(HeuristicEvaluator::default().evaluate(&board, Mark::X), 1);
    }

    #[test]
    fn blocked_pair_scores_nothing() {
        let board = TicTacToe::from_string("XXO......").unwrap();
        assert_eq!(HeuristicEvaluator::default().evaluate(&board, Mark::X), 0);
    }

    #[test]
    fn opponent_line_is_penalised() {
        let board = TicTacToe::from_string("OOOXX....").unwrap();
        let eval = HeuristicEvaluator::default();
        // Opponent top row -100, open X pair in the middle row +1
        assert_eq!(eval.evaluate(&board, Mark::X), -99);
        assert_eq!(eval.evaluate(&board, Mark::O), 100);
    }

    #[test]
    fn custom_weights_are_used() {
        let weights = HeuristicWeights {
            complete: 10,
            open_pair: 3,
            opponent_complete: -7,
        };
        let board = TicTacToe::from_string("X...X....").unwrap();
        assert_eq!(HeuristicEvaluator::new(weights).evaluate(&board, Mark::X), 3);
    }

    #[test]
    fn connect_four_three_with_gap_is_complete_window() {
        let mut board = ConnectFour::new();
        for col in [0, 1, 3] {
            board.apply_move(col, Mark::X).unwrap();
        }
        // Bottom row windows: [0..4) has X X . X -> 3 own; [1..5) X . X . -> pair
        let eval = HeuristicEvaluator::default();
        assert_eq!(eval.evaluate(&board, Mark::X), 101);
    }
}
