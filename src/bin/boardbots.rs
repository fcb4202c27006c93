//! boardbots CLI - Play, evaluate and train board-game agents
//!
//! Set `RUST_LOG` (for example `RUST_LOG=boardbots=debug`) to see search and
//! training diagnostics on stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boardbots")]
#[command(version, about = "Agents for Tic-Tac-Toe and Connect-4", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game with the board printed after every move
    Play(boardbots::cli::commands::play::PlayArgs),

    /// Play a series of games and report win rates
    Evaluate(boardbots::cli::commands::evaluate::EvaluateArgs),

    /// Train a Q-learning agent, then evaluate it
    Train(Box<boardbots::cli::commands::train::TrainArgs>),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => boardbots::cli::commands::play::execute(args),
        Commands::Evaluate(args) => boardbots::cli::commands::evaluate::execute(args),
        Commands::Train(args) => boardbots::cli::commands::train::execute(*args),
    }
}
