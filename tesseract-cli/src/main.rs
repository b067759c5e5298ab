//! Tesseract CLI - Command-line interface
//!
//! Commands:
//! - play: Two players at one terminal
//! - replay: Apply a move list and show the result
//! - simulate: Random playouts and outcome statistics
//! - serve: Start the browser visualizer server

mod play;
mod render;
mod replay;
mod server;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tesseract")]
#[command(about = "4D tic-tac-toe on a 3x3x3x3 board")]
struct Cli {
    /// Random seed for reproducible simulations
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(play::PlayArgs),
    /// Replay a list of moves
    Replay(replay::ReplayArgs),
    /// Play random games and report statistics
    Simulate(simulate::SimulateArgs),
    /// Start visualizer server
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Replay(args) => replay::run(args),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
        Commands::Serve(args) => server::run(args),
    }
}
