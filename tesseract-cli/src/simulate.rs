//! Simulate command - play many random games and summarize the outcomes
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: configuration, formatting utilities

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use tesseract_core::{random_playout, Direction, GameState, Mark, DIRECTIONS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Play games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Simulation settings
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of games
    pub games: usize,
    /// Base seed; game `i` uses `seed + i`
    pub seed: u64,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Show a progress bar (sequential runs only)
    pub progress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 42,
            parallel: false,
            progress: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    seed: u64,
    state: GameState,
    moves: usize,
}

/// Aggregated results
#[derive(Clone, Debug, Default)]
struct SimulationResults {
    games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    avg_moves: f32,
    shortest: Option<(usize, u64)>,
    longest: Option<(usize, u64)>,
    wins_by_direction: FxHashMap<Direction, usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Build the configuration
/// 2. Play every game
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Simulating {} random games (seed={}, parallel={})",
        config.games,
        config.seed,
        config.parallel
    );

    let records = play_games(&config);
    let results = compute_statistics(&records);

    tracing::info!(
        "Simulation finished: X {} / O {} / draw {}",
        results.x_wins,
        results.o_wins,
        results.draws
    );

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &SimulateArgs, seed: Option<u64>) -> Result<SimulationConfig> {
    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut config = SimulationConfig::default()
        .with_games(args.games)
        .with_parallel(args.parallel)
        .with_progress(!args.json && !args.parallel);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Play all games. Records come back in game order either way.
fn play_games(config: &SimulationConfig) -> Vec<GameRecord> {
    let seed_for = |i: usize| config.seed.wrapping_add(i as u64);

    if config.parallel {
        return (0..config.games)
            .into_par_iter()
            .map(|i| play_single_game(seed_for(i)))
            .collect();
    }

    let progress = config.progress.then(|| create_progress_bar(config.games));
    let records = (0..config.games)
        .map(|i| {
            let record = play_single_game(seed_for(i));
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            record
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    records
}

fn report_results(results: &SimulationResults, json: bool) -> Result<()> {
    if json {
        println!("{}", format_json(results)?);
    } else {
        println!("{}", format_text(results));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(seed: u64) -> GameRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let game = random_playout(&mut rng);
    tracing::debug!("Game seed={}: {} in {} moves", seed, game.state(), game.move_count());

    GameRecord {
        seed,
        state: *game.state(),
        moves: game.move_count(),
    }
}

fn compute_statistics(records: &[GameRecord]) -> SimulationResults {
    let mut results = SimulationResults {
        games: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.state {
            GameState::Won { winner, line } => {
                match winner {
                    Mark::X => results.x_wins += 1,
                    Mark::O => results.o_wins += 1,
                }
                *results.wins_by_direction.entry(line.direction).or_insert(0) += 1;
            }
            GameState::Draw => results.draws += 1,
            GameState::Playing { .. } => {}
        }

        let entry = (record.moves, record.seed);
        if results.shortest.map_or(true, |(m, _)| record.moves < m) {
            results.shortest = Some(entry);
        }
        if results.longest.map_or(true, |(m, _)| record.moves > m) {
            results.longest = Some(entry);
        }
    }

    let total_moves: usize = records.iter().map(|r| r.moves).sum();
    results.avg_moves = if records.is_empty() {
        0.0
    } else {
        total_moves as f32 / records.len() as f32
    };

    results
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(games: usize) -> ProgressBar {
    let pb = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games") {
        pb.set_style(style);
    }
    pb
}

/// Directions that produced wins, most frequent first, ties in scan order
fn direction_ranking(results: &SimulationResults) -> Vec<(Direction, usize)> {
    let mut ranking: Vec<(usize, Direction, usize)> = DIRECTIONS
        .iter()
        .enumerate()
        .filter_map(|(i, d)| results.wins_by_direction.get(d).map(|&n| (i, *d, n)))
        .collect();
    ranking.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    ranking.into_iter().map(|(_, d, n)| (d, n)).collect()
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn format_text(results: &SimulationResults) -> String {
    let total = results.games;
    let mut lines = vec![
        "=== Simulation Results ===".to_string(),
        format!("Total games: {}", total),
        format!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total)),
        format!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total)),
        format!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total)),
        format!("Avg moves:   {:.1}", results.avg_moves),
    ];
    if let (Some((short, short_seed)), Some((long, long_seed))) = (results.shortest, results.longest) {
        lines.push(format!("Shortest:    {} moves (seed {})", short, short_seed));
        lines.push(format!("Longest:     {} moves (seed {})", long, long_seed));
    }

    lines.push(String::new());
    lines.push("Winning directions:".to_string());
    for (d, n) in direction_ranking(results) {
        lines.push(format!(
            "  ({:>2}, {:>2}, {:>2}, {:>2})  {}",
            d.dx, d.dy, d.dz, d.dw, n
        ));
    }
    lines.join("\n")
}

fn format_json(results: &SimulationResults) -> Result<String> {
    #[derive(Serialize)]
    struct JsonDirection {
        direction: Direction,
        axes: usize,
        wins: usize,
    }

    #[derive(Serialize)]
    struct JsonOutput {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        avg_moves: f32,
        shortest_moves: Option<usize>,
        longest_moves: Option<usize>,
        x_win_rate: f32,
        directions: Vec<JsonDirection>,
    }

    let output = JsonOutput {
        total_games: results.games,
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        shortest_moves: results.shortest.map(|(m, _)| m),
        longest_moves: results.longest.map(|(m, _)| m),
        x_win_rate: percent(results.x_wins, results.games) / 100.0,
        directions: direction_ranking(results)
            .into_iter()
            .map(|(direction, wins)| JsonDirection {
                direction,
                axes: direction.axes(),
                wins,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config(games: usize, parallel: bool) -> SimulationConfig {
        SimulationConfig::default()
            .with_games(games)
            .with_seed(9)
            .with_parallel(parallel)
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(&[]);
        assert_eq!(results.games, 0);
        assert_eq!(results.x_wins + results.o_wins + results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
        assert!(results.shortest.is_none());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let sequential = play_games(&config(12, false));
        let parallel = play_games(&config(12, true));

        assert_eq!(sequential.len(), 12);
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.state, b.state);
            assert_eq!(a.moves, b.moves);
        }
    }

    #[test]
    fn test_statistics_add_up() {
        let records = play_games(&config(25, false));
        let results = compute_statistics(&records);

        assert_eq!(results.x_wins + results.o_wins + results.draws, 25);
        let by_direction: usize = results.wins_by_direction.values().sum();
        assert_eq!(by_direction, results.x_wins + results.o_wins);

        let (shortest, _) = results.shortest.unwrap();
        let (longest, _) = results.longest.unwrap();
        assert!(shortest >= 5);
        assert!(longest <= 81);
        assert!(shortest as f32 <= results.avg_moves && results.avg_moves <= longest as f32);
    }

    #[test]
    fn test_direction_ranking_order() {
        let mut results = SimulationResults::default();
        results.wins_by_direction.insert(DIRECTIONS[5], 2);
        results.wins_by_direction.insert(DIRECTIONS[1], 2);
        results.wins_by_direction.insert(DIRECTIONS[30], 7);

        let ranking = direction_ranking(&results);
        assert_eq!(
            ranking,
            vec![(DIRECTIONS[30], 7), (DIRECTIONS[1], 2), (DIRECTIONS[5], 2)]
        );
    }

    #[test]
    fn test_build_config() {
        let args = SimulateArgs {
            games: 0,
            parallel: false,
            json: false,
        };
        assert!(build_config(&args, None).is_err());

        let args = SimulateArgs {
            games: 3,
            parallel: false,
            json: true,
        };
        let config = build_config(&args, Some(5)).unwrap();
        assert_eq!(config.seed, 5);
        assert!(!config.progress);
    }

    #[test]
    fn test_json_output() {
        let results = compute_statistics(&play_games(&config(5, false)));
        let json: serde_json::Value = serde_json::from_str(&format_json(&results).unwrap()).unwrap();
        assert_eq!(json["total_games"], 5);
        assert!(json["directions"].as_array().is_some());
    }
}
