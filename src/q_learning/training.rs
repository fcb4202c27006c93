//! Training episodes for [`QLearningAgent`]
//!
//! The first mover alternates between episodes, starting with the learner, so
//! the table covers positions from both seats. Only the learner's own
//! transitions update the table. A win by the opponent is charged to the
//! learner's last transition.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    Error, Result,
    game::{GameKind, GameOutcome, GameState, Mark},
    ports::Agent,
    q_learning::{agent::QLearningAgent, config::TrainingOpponent},
};

/// Running totals over a batch of training episodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EpisodeTally {
    wins: usize,
    losses: usize,
    draws: usize,
}

impl EpisodeTally {
    fn record(&mut self, outcome: GameOutcome, mark: Mark) {
        match outcome.winner() {
            Some(winner) if winner == mark => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }
}

impl QLearningAgent {
    /// Play `episodes` self-play games of `game` and learn from them.
    ///
    /// The opponent is chosen by [`QLearningConfig::opponent`]; it holds the
    /// other mark and never updates any table.
    ///
    /// [`QLearningConfig::opponent`]: crate::q_learning::QLearningConfig::opponent
    ///
    /// # Errors
    ///
    /// Propagates move and table-lock errors from the episodes.
    pub fn train(&mut self, game: GameKind, episodes: usize) -> Result<()> {
        self.train_with(game, episodes, |_, _| {})
    }

    /// Like [`QLearningAgent::train`], calling `on_episode` with the number
    /// of finished episodes and the learner after each one.
    ///
    /// # Errors
    ///
    /// Propagates move and table-lock errors from the episodes.
    pub fn train_with(
        &mut self,
        game: GameKind,
        episodes: usize,
        on_episode: impl FnMut(usize, &QLearningAgent),
    ) -> Result<()> {
        let opponent_seed = self.rng.random::<u64>();
        let opponent_config = self.config.with_epsilon(0.0);
        let mut opponent = match self.config.opponent {
            TrainingOpponent::SharedTable => QLearningAgent::with_shared_table(
                self.mark.opponent(),
                opponent_config,
                self.table(),
            ),
            TrainingOpponent::IsolatedTable => {
                QLearningAgent::new(self.mark.opponent(), self.config)
            }
        }
        .with_seed(opponent_seed);

        debug!(
            opponent = %self.config.opponent,
            %game,
            episodes,
            "training against built-in opponent"
        );
        self.train_against_with(game, episodes, &mut opponent, on_episode)
    }

    /// Play `episodes` games of `game` against `opponent` and learn from them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `opponent` holds the same
    /// mark as the learner, [`Error::ContractViolation`] if it plays an
    /// illegal move, and propagates table-lock errors.
    pub fn train_against(
        &mut self,
        game: GameKind,
        episodes: usize,
        opponent: &mut dyn Agent,
    ) -> Result<()> {
        self.train_against_with(game, episodes, opponent, |_, _| {})
    }

    /// Like [`QLearningAgent::train_against`], reporting progress through
    /// `on_episode` after each episode.
    ///
    /// # Errors
    ///
    /// Same as [`QLearningAgent::train_against`].
    #[instrument(
        skip(self, opponent, on_episode),
        fields(agent = %self.name, opponent = opponent.name())
    )]
    pub fn train_against_with(
        &mut self,
        game: GameKind,
        episodes: usize,
        opponent: &mut dyn Agent,
        mut on_episode: impl FnMut(usize, &QLearningAgent),
    ) -> Result<()> {
        if opponent.mark() == self.mark {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "training opponent '{}' plays {} like the learner",
                    opponent.name(),
                    self.mark
                ),
            });
        }

        let mut tally = EpisodeTally::default();
        for episode in 0..episodes {
            let mut state = game.new_state();
            let learner_opens = episode.is_multiple_of(2);
            let outcome = self.run_episode(state.as_mut(), opponent, learner_opens)?;
            tally.record(outcome, self.mark);
            self.decay_epsilon();

            debug!(
                episode,
                learner_opens,
                ?outcome,
                epsilon = self.epsilon,
                "training episode finished"
            );
            on_episode(episode + 1, self);
        }

        info!(
            agent = %self.name,
            %game,
            episodes,
            wins = tally.wins,
            losses = tally.losses,
            draws = tally.draws,
            table_size = self.table_size()?,
            "training complete"
        );
        Ok(())
    }

    fn run_episode(
        &mut self,
        state: &mut dyn GameState,
        opponent: &mut dyn Agent,
        learner_opens: bool,
    ) -> Result<GameOutcome> {
        let mut last_transition: Option<(String, usize)> = None;
        let mut learner_to_move = learner_opens;

        while !state.is_terminal() {
            if learner_to_move {
                let prior_state = state.serialized_state();
                let mv = self.select_move(state)?;
                state.apply_move(mv, self.mark)?;

                let reward = state
                    .terminal_winner()
                    .map_or(0.0, |winner| GameOutcome::Win(winner).reward_for(self.mark));
                self.update_table(&prior_state, state, mv, reward)?;
                last_transition = Some((prior_state, mv));
            } else {
                let mv = opponent.select_move(state)?;
                if !state.is_legal(mv) {
                    warn!(agent = opponent.name(), mv, "opponent returned an illegal move");
                    return Err(Error::ContractViolation {
                        agent: opponent.name().to_string(),
                        position: mv,
                        reason: "move is not legal in the current position".to_string(),
                    });
                }
                state.apply_move(mv, opponent.mark())?;

                if state.terminal_winner() == Some(opponent.mark())
                    && let Some((prior_state, learner_move)) = &last_transition
                {
                    self.update_table(prior_state, state, *learner_move, -1.0)?;
                }
            }
            learner_to_move = !learner_to_move;
        }

        Ok(state
            .terminal_winner()
            .map_or(GameOutcome::Draw, GameOutcome::Win))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{QLearningConfig, QTable};

    /// Plays a fixed list of moves in order
    struct Scripted {
        mark: Mark,
        moves: Vec<usize>,
    }

    impl Agent for Scripted {
        fn mark(&self) -> Mark {
            self.mark
        }

        fn select_move(&mut self, _state: &mut dyn GameState) -> Result<usize> {
            if self.moves.is_empty() {
                return Err(Error::NoValidMoves);
            }
            Ok(self.moves.remove(0))
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    #[test]
    fn training_grows_the_table() {
        let mut agent = QLearningAgent::new(Mark::X, QLearningConfig::default()).with_seed(42);
        agent.train(GameKind::TicTacToe, 50).unwrap();
        assert!(agent.table_size().unwrap() > 0);

        let before = agent.table_size().unwrap();
        agent.train(GameKind::TicTacToe, 50).unwrap();
        assert!(agent.table_size().unwrap() >= before);
    }

    #[test]
    fn shared_opponent_trains_connect_four() {
        let config = QLearningConfig::default().with_opponent(TrainingOpponent::SharedTable);
        let mut agent = QLearningAgent::new(Mark::O, config).with_seed(8);
        agent.train(GameKind::ConnectFour, 5).unwrap();
        assert!(agent.table_size().unwrap() > 0);
    }

    #[test]
    fn opponent_win_penalises_last_transition() {
        let table = QTable::new(0.3, 0.9, 0.0).into_shared();
        {
            let mut table = table.lock().unwrap();
            table.set(".........", 0, 1.0);
            table.set("X..O.....", 1, 1.0);
            table.set("XX.OO....", 6, 1.0);
        }
        let config = QLearningConfig::default().with_epsilon(0.0);
        let mut agent = QLearningAgent::with_shared_table(Mark::X, config, table).with_seed(0);
        let mut opponent = Scripted {
            mark: Mark::O,
            moves: vec![3, 4, 5],
        };

        agent
            .train_against(GameKind::TicTacToe, 1, &mut opponent)
            .unwrap();

        // 1.0 -> 0.7 after the quiet move, then 0.7 + 0.3 * (-1 - 0.7)
        let value = agent.table().lock().unwrap().get("XX.OO....", 6);
        assert!((value - 0.19).abs() < 1e-9, "value {value}");
    }

    #[test]
    fn learner_win_is_rewarded() {
        let table = QTable::new(0.3, 0.9, 0.0).into_shared();
        {
            let mut table = table.lock().unwrap();
            table.set(".........", 0, 0.5);
            table.set("X..O.....", 1, 0.5);
            table.set("XX.OO....", 2, 0.5);
        }
        let config = QLearningConfig::default().with_epsilon(0.0);
        let mut agent = QLearningAgent::with_shared_table(Mark::X, config, table).with_seed(0);
        let mut opponent = Scripted {
            mark: Mark::O,
            moves: vec![3, 4],
        };

        agent
            .train_against(GameKind::TicTacToe, 1, &mut opponent)
            .unwrap();

        // 0.5 + 0.3 * (1 - 0.5)
        let value = agent.table().lock().unwrap().get("XX.OO....", 2);
        assert!((value - 0.65).abs() < 1e-9, "value {value}");
    }

    #[test]
    fn illegal_opponent_move_is_reported() {
        let mut agent = QLearningAgent::new(Mark::X, QLearningConfig::default()).with_seed(1);
        let mut opponent = Scripted {
            mark: Mark::O,
            moves: vec![42],
        };
        let result = agent.train_against(GameKind::TicTacToe, 1, &mut opponent);
        assert!(matches!(result, Err(Error::ContractViolation { .. })));
    }

    #[test]
    fn same_mark_opponent_is_rejected() {
        let mut agent = QLearningAgent::new(Mark::X, QLearningConfig::default());
        let mut opponent = Scripted {
            mark: Mark::X,
            moves: vec![],
        };
        let result = agent.train_against(GameKind::TicTacToe, 1, &mut opponent);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn tally_counts_from_learner_view() {
        let mut tally = EpisodeTally::default();
        tally.record(GameOutcome::Win(Mark::O), Mark::O);
        tally.record(GameOutcome::Win(Mark::X), Mark::O);
        tally.record(GameOutcome::Draw, Mark::O);
        assert_eq!(
            tally,
            EpisodeTally {
                wins: 1,
                losses: 1,
                draws: 1
            }
        );
    }

    #[test]
    fn second_episode_lets_the_opponent_open() {
        // Learner moves from a board holding only O's opening in episode two
        let mut opponent = crate::agents::RandomAgent::with_seed(Mark::O, 4);
        let mut agent = QLearningAgent::new(Mark::X, QLearningConfig::default()).with_seed(6);
        agent
            .train_against(GameKind::TicTacToe, 2, &mut opponent)
            .unwrap();

        let table = agent.table();
        let table = table.lock().unwrap();
        let after_o_opening = (0..9).any(|opening| {
            let mut key = *b".........";
            key[opening] = b'O';
            let key = String::from_utf8(key.to_vec()).unwrap();
            (0..9).any(|mv| table.contains(&key, mv))
        });
        assert!(after_o_opening);
    }

    #[test]
    fn progress_callback_sees_every_episode_without_changing_training() {
        let trained = |report: bool| {
            let mut agent = QLearningAgent::new(Mark::X, QLearningConfig::default()).with_seed(12);
            let mut seen = Vec::new();
            if report {
                agent
                    .train_with(GameKind::TicTacToe, 30, |done, learner| {
                        seen.push((done, learner.epsilon()));
                    })
                    .unwrap();
            } else {
                agent.train(GameKind::TicTacToe, 30).unwrap();
            }
            (agent.table_size().unwrap(), seen)
        };

        let (quiet_size, _) = trained(false);
        let (reported_size, seen) = trained(true);
        assert_eq!(quiet_size, reported_size);
        assert_eq!(seen.len(), 30);
        assert_eq!(seen.first().map(|&(done, _)| done), Some(1));
        assert_eq!(seen.last().map(|&(done, _)| done), Some(30));
    }
}
