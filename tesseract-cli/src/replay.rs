//! Replay command - apply a list of moves and report the outcome
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: replay_moves(), report_results()
//! - Level 3: replay_strict(), replay_lenient()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tesseract_core::{Coord, Game, MoveError};
use tesseract_server::GameSnapshot;

use crate::render::{render_board, render_status};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Moves in order, each as x,y,z,w
    #[arg(value_name = "MOVE", required = true)]
    pub moves: Vec<Coord>,

    /// Fail on the first illegal move instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Output the final game as JSON
    #[arg(long)]
    pub json: bool,
}

/// A move that was ignored
#[derive(Clone, Copy, Debug)]
struct SkippedMove {
    index: usize,
    coord: Coord,
    error: MoveError,
}

#[derive(Debug)]
struct ReplayOutcome {
    game: Game,
    skipped: Vec<SkippedMove>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
pub fn run(args: ReplayArgs) -> Result<()> {
    let outcome = replay_moves(&args.moves, args.strict)?;

    tracing::info!(
        "Replayed {} moves ({} skipped): {}",
        outcome.game.move_count(),
        outcome.skipped.len(),
        outcome.game.state()
    );

    report_results(&outcome, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn replay_moves(moves: &[Coord], strict: bool) -> Result<ReplayOutcome> {
    if strict {
        replay_strict(moves)
    } else {
        Ok(replay_lenient(moves))
    }
}

fn report_results(outcome: &ReplayOutcome, args: &ReplayArgs) -> Result<()> {
    if args.json {
        println!("{}", format_json(outcome)?);
    } else {
        println!("{}", format_text(outcome));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn replay_strict(moves: &[Coord]) -> Result<ReplayOutcome> {
    let game = Game::replay(moves.iter().copied()).context("Replay stopped")?;
    Ok(ReplayOutcome {
        game,
        skipped: Vec::new(),
    })
}

/// Illegal moves are dropped, the way the board ignores clicks on taken cells
fn replay_lenient(moves: &[Coord]) -> ReplayOutcome {
    let mut game = Game::new();
    let mut skipped = Vec::new();

    for (index, &coord) in moves.iter().enumerate() {
        if let Err(error) = game.apply_move(coord) {
            tracing::warn!("Skipping move {} at {}: {}", index, coord, error);
            skipped.push(SkippedMove {
                index,
                coord,
                error,
            });
        }
    }

    ReplayOutcome { game, skipped }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_text(outcome: &ReplayOutcome) -> String {
    let game = &outcome.game;
    let mut text = render_board(game.board(), game.winning_line());
    text.push_str("\n\n");
    text.push_str(&render_status(game));
    text.push_str(&format!("\nMoves applied: {}", game.move_count()));

    for skip in &outcome.skipped {
        text.push_str(&format!(
            "\nSkipped move {} at {}: {}",
            skip.index, skip.coord, skip.error
        ));
    }
    text
}

fn format_json(outcome: &ReplayOutcome) -> Result<String> {
    #[derive(Serialize)]
    struct JsonSkipped {
        index: usize,
        coord: Coord,
        error: String,
    }

    #[derive(Serialize)]
    struct JsonOutput {
        game: GameSnapshot,
        history: Vec<Coord>,
        skipped: Vec<JsonSkipped>,
    }

    let output = JsonOutput {
        game: GameSnapshot::from_game(&outcome.game),
        history: outcome.game.history().iter().map(|&(_, c)| c).collect(),
        skipped: outcome
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                index: s.index,
                coord: s.coord,
                error: s.error.to_string(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

// ============================================================================
// TESTS
// ============================================================================
