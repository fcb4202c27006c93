//! Evaluate command - Match series between two agents

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentConfig, AgentSpec, App},
    cli::{
        config::GameArg,
        output::{print_kv, print_section, print_series_result},
    },
    game::{GameKind, Mark},
    pipeline::{MatchSeries, MetricsObserver, ProgressObserver, SeriesConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Play a series of games between two agents")]
pub struct EvaluateArgs {
    /// Board game to play
    #[arg(long, value_enum, default_value = "tictactoe")]
    pub game: GameArg,

    /// Agent playing X
    #[arg(long, short = 'x', default_value = "minimax")]
    pub x: AgentSpec,

    /// Agent playing O
    #[arg(long, short = 'o', default_value = "random")]
    pub o: AgentSpec,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Swap the first mover after every game
    #[arg(long)]
    pub alternate: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let game = GameKind::from(args.game);
    let mut app = App::new();
    if let Some(seed) = args.seed {
        app = app.with_default_seed(seed);
    }

    let mut x = app
        .create_agent(&AgentConfig::new(args.x.clone()), Mark::X, game)
        .with_context(|| format!("failed to create X agent '{}'", args.x))?;
    let mut o = app
        .create_agent(&AgentConfig::new(args.o.clone()), Mark::O, game)
        .with_context(|| format!("failed to create O agent '{}'", args.o))?;

    print_section(&format!("{game}: {} vs {}", x.name(), o.name()));
    print_kv("Games", &args.games.to_string());
    print_kv("Alternate first", &args.alternate.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let config = SeriesConfig {
        games: args.games,
        seed: args.seed,
        alternate_first: args.alternate,
    };
    let mut metrics = MetricsObserver::new();
    let mut series = MatchSeries::new(config).with_observer(Box::new(&mut metrics));
    if !args.no_progress {
        series = series.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = series.run(game, x.as_mut(), o.as_mut())?;
    drop(series);

    print_section("Results");
    print_series_result(&result);
    print_kv(
        "Average length",
        &format!("{:.1} moves", metrics.avg_game_length()),
    );

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}
