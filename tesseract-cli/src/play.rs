//! Play command - interactive two-player game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_session() - read/apply/render loop
//! - Level 3: handle_input() - one line of input
//! - Level 4: parsing and output helpers

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use tesseract_core::{Coord, Game};

use crate::render::{render_board, render_status};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug, Default)]
pub struct PlayArgs {
    /// Only print the status line after each move, not the board
    #[arg(long)]
    pub quiet: bool,
}

/// What one line of input asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(Coord),
    Reset,
    Help,
    Quit,
    Nothing,
}

const HELP: &str = "Enter a move as x,y,z,w (each 0-2), `reset` for a new game, `quit` to leave.";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on stdin/stdout
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let game = run_session(stdin.lock(), stdout.lock(), &args)?;

    tracing::info!(
        "Session ended: {} after {} moves",
        game.state(),
        game.move_count()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read commands until `quit` or end of input, returning the final game
pub fn run_session<R: BufRead, W: Write>(input: R, mut out: W, args: &PlayArgs) -> Result<Game> {
    let mut game = Game::new();

    writeln!(out, "{HELP}")?;
    show(&mut out, &game, args)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if handle_input(&mut out, &mut game, command)? {
                    show(&mut out, &game, args)?;
                }
            }
            Err(e) => writeln!(out, "Cannot read {:?}: {}", line.trim(), e)?,
        }
    }

    Ok(game)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply one command. Returns whether the game changed.
fn handle_input<W: Write>(out: &mut W, game: &mut Game, command: Command) -> Result<bool> {
    match command {
        Command::Move(coord) => match game.apply_move(coord) {
            Ok(_) => Ok(true),
            Err(e) => {
                writeln!(out, "Illegal move {}: {}", coord, e)?;
                Ok(false)
            }
        },
        Command::Reset => {
            game.reset();
            writeln!(out, "New game.")?;
            Ok(true)
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            Ok(false)
        }
        Command::Quit | Command::Nothing => Ok(false),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_command(line: &str) -> Result<Command, tesseract_core::CoordParseError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "r" | "reset" | "new" => Ok(Command::Reset),
        "h" | "help" | "?" => Ok(Command::Help),
        other => other.parse().map(Command::Move),
    }
}

fn show<W: Write>(out: &mut W, game: &Game, args: &PlayArgs) -> Result<()> {
    if !args.quiet {
        writeln!(out, "{}", render_board(game.board(), game.winning_line()))?;
    }
    writeln!(out, "{}", render_status(game))?;
    if game.is_over() {
        writeln!(out, "Game over. Type `reset` to play again or `quit` to leave.")?;
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
