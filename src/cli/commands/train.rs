//! Train command - Train a Q-learning agent and evaluate it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentConfig, AgentSpec, App},
    cli::{
        config::{GameArg, OpponentArg},
        output::{
            create_training_progress, format_number, print_kv, print_section, print_series_result,
        },
    },
    game::{GameKind, Mark},
    pipeline::{MatchSeries, ProgressObserver, SeriesConfig},
    ports::Agent,
    q_learning::{QLearningAgent, QLearningConfig},
};

/// Progress bar redraws over a training run
const PROGRESS_STEPS: usize = 100;

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Board game to train on
    #[arg(long, value_enum, default_value = "tictactoe")]
    pub game: GameArg,

    /// Number of self-play training episodes
    #[arg(long, short = 'e', default_value_t = 10_000)]
    pub episodes: usize,

    /// Built-in training opponent
    #[arg(long, value_enum, default_value = "isolated")]
    pub opponent: OpponentArg,

    /// Learning rate α
    #[arg(long, default_value_t = 0.3)]
    pub learning_rate: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub discount: f64,

    /// Exploration rate ε during training
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Multiplicative ε decay per episode
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_decay: f64,

    /// Lower bound for the decayed ε
    #[arg(long, default_value_t = 0.0)]
    pub min_epsilon: f64,

    /// Games to play greedily after training (0 to skip)
    #[arg(long, default_value_t = 100)]
    pub eval_games: usize,

    /// Opponent for the post-training evaluation
    #[arg(long, default_value = "random")]
    pub eval_opponent: AgentSpec,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Export evaluation results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl TrainArgs {
    fn q_learning_config(&self) -> QLearningConfig {
        QLearningConfig::default()
            .with_learning_rate(self.learning_rate)
            .with_discount_factor(self.discount)
            .with_epsilon(self.epsilon)
            .with_epsilon_decay(self.epsilon_decay, self.min_epsilon)
            .with_opponent(self.opponent.into())
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let game = GameKind::from(args.game);
    let config = args.q_learning_config();
    config.validate().context("invalid training parameters")?;

    let mut learner = QLearningAgent::new(Mark::X, config);
    if let Some(seed) = args.seed {
        learner = learner.with_seed(seed);
    }

    print_section(&format!("Training {} on {game}", learner.name()));
    print_kv("Episodes", &format_number(args.episodes));
    print_kv("Opponent", &config.opponent.to_string());
    print_kv(
        "Rates",
        &format!(
            "α={} γ={} ε={}",
            config.learning_rate, config.discount_factor, config.epsilon
        ),
    );

    train_with_progress(&mut learner, game, args.episodes, !args.no_progress)?;
    print_kv("Table entries", &format_number(learner.table_size()?));

    if args.eval_games == 0 {
        return Ok(());
    }

    learner.set_epsilon(0.0);
    let mut app = App::new();
    if let Some(seed) = args.seed {
        app = app.with_default_seed(seed.wrapping_add(1));
    }
    let mut opponent = app
        .create_agent(&AgentConfig::new(args.eval_opponent.clone()), Mark::O, game)
        .with_context(|| format!("failed to create opponent '{}'", args.eval_opponent))?;

    print_section(&format!("Evaluation against {}", opponent.name()));
    let mut series = MatchSeries::new(SeriesConfig {
        games: args.eval_games,
        seed: args.seed.map(|seed| seed.wrapping_add(2)),
        alternate_first: true,
    });
    if !args.no_progress {
        series = series.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = series.run(game, &mut learner, opponent.as_mut())?;
    print_series_result(&result);

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

/// Train in a single run, updating a progress bar from the episode callback
fn train_with_progress(
    learner: &mut QLearningAgent,
    game: GameKind,
    episodes: usize,
    show_progress: bool,
) -> Result<()> {
    if !show_progress {
        learner.train(game, episodes)?;
        return Ok(());
    }

    let pb = create_training_progress(episodes as u64)?;
    let step = (episodes / PROGRESS_STEPS).max(1);
    learner.train_with(game, episodes, |done, agent| {
        if done.is_multiple_of(step) || done == episodes {
            pb.set_position(done as u64);
            pb.set_message(format!("ε={:.3}", agent.epsilon()));
        }
    })?;
    pb.finish_with_message(format!("{} entries", format_number(learner.table_size()?)));
    Ok(())
}
