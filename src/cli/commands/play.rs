//! Play command - One game between two agents

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentConfig, AgentSpec, App},
    cli::config::GameArg,
    game::{GameKind, GameOutcome, Mark},
    pipeline::{BoardPrinter, Observer, play_game},
};

#[derive(Parser, Debug)]
#[command(about = "Play a single game")]
pub struct PlayArgs {
    /// Board game to play
    #[arg(long, value_enum, default_value = "tictactoe")]
    pub game: GameArg,

    /// Agent playing X (moves first)
    #[arg(long, short = 'x', default_value = "random")]
    pub x: AgentSpec,

    /// Agent playing O
    #[arg(long, short = 'o', default_value = "minimax")]
    pub o: AgentSpec,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only print the final board and result
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
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

    println!("{game}: {} (X) vs {} (O)\n", x.name(), o.name());

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if !args.quiet {
        observers.push(Box::new(BoardPrinter::stdout()));
    }

    let mut state = game.new_state();
    let outcome = play_game(state.as_mut(), x.as_mut(), o.as_mut(), &mut observers)?;

    if args.quiet {
        println!("{}", state.render());
        match outcome {
            GameOutcome::Win(mark) => println!("{mark} wins!"),
            GameOutcome::Draw => println!("It's a tie!"),
        }
    }
    Ok(())
}
