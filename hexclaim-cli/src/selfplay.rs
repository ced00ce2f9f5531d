//! Self-play command - AI vs AI matches with aggregate statistics
//!
//! Orchestration mirrors a tournament runner: run() loads configuration,
//! plays the requested games (alternating the first mover for fairness), and
//! reports text or JSON results.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexclaim_core::{
    Board, Difficulty, EndReason, Grid, HeuristicAi, Match, Participant, Side,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DifficultyArg {
    Normal,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play (first mover alternates)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board radius
    #[arg(long, default_value = "8")]
    pub radius: i8,

    /// Red difficulty profile
    #[arg(long, value_enum, default_value = "normal")]
    pub red: DifficultyArg,

    /// Blue difficulty profile
    #[arg(long, value_enum, default_value = "normal")]
    pub blue: DifficultyArg,

    /// Number of blocked cells, laid out per-game from the run seed
    #[arg(long, default_value = "0")]
    pub blocked: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    first: Side,
    winner: Option<Side>,
    reason: Option<EndReason>,
    moves: u32,
}

/// Aggregated self-play results
#[derive(Clone, Debug)]
struct PlayResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run the self-play command: play every game, then report.
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    anyhow::ensure!(
        (1..=60).contains(&args.radius),
        "board radius must be between 1 and 60"
    );

    let run_seed = seed.unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());
    tracing::info!(
        games = args.games,
        radius = args.radius,
        run_seed,
        "starting self-play"
    );

    let results = play_all_games(&args, run_seed)?;
    report_results(&results, &args);
    Ok(())
}

fn play_all_games(args: &PlayArgs, run_seed: u64) -> Result<PlayResults> {
    let mut games = Vec::with_capacity(args.games);

    for game_num in 1..=args.games {
        let record = play_single_game(args, run_seed, game_num)
            .with_context(|| format!("game {} failed", game_num))?;
        tracing::info!(
            game = record.game_number,
            winner = ?record.winner,
            reason = ?record.reason,
            moves = record.moves,
            "game finished"
        );
        games.push(record);
    }

    Ok(compute_statistics(games))
}

// ============================================================================
// GAME LOOP
// ============================================================================

fn play_single_game(args: &PlayArgs, run_seed: u64, game_number: usize) -> Result<GameRecord> {
    let red: Difficulty = args.red.into();
    let blue: Difficulty = args.blue.into();

    let board_seed = run_seed.wrapping_add(game_number as u64);
    let grid = if args.blocked > 0 {
        Grid::with_blocked_cells(args.radius, board_seed, args.blocked)
    } else {
        Grid::new(args.radius)
    };

    let board = Board::with_initial_pieces(
        grid,
        red.handicap_multiplier(),
        blue.handicap_multiplier(),
    )?;

    // Alternate the first mover for fairness
    let first = if game_number % 2 == 1 {
        Side::Red
    } else {
        Side::Blue
    };
    let mut game = Match::new(board, first, Participant::Ai, Participant::Ai);

    let mut red_ai = HeuristicAi::from_difficulty(red, board_seed.wrapping_mul(2));
    let mut blue_ai = HeuristicAi::from_difficulty(blue, board_seed.wrapping_mul(2) + 1);

    // Relocate-only shuffles could in principle cycle, so cap the game length
    let move_cap = game.board().grid().cell_count() as u32 * 4;
    let mut moves = 0u32;
    let mut consecutive_passes = 0u32;

    while !game.is_over() && moves < move_cap {
        let ai = match game.current_side() {
            Side::Red => &mut red_ai,
            Side::Blue => &mut blue_ai,
        };
        match game.take_ai_turn(ai)? {
            Some(_) => {
                moves += 1;
                consecutive_passes = 0;
            }
            None => {
                consecutive_passes += 1;
                if consecutive_passes >= 2 {
                    break;
                }
            }
        }
    }

    Ok(GameRecord {
        game_number,
        first,
        winner: game.winner(),
        reason: game.outcome().reason,
        moves,
    })
}

// ============================================================================
// STATISTICS & REPORTING
// ============================================================================

fn compute_statistics(games: Vec<GameRecord>) -> PlayResults {
    let red_wins = games.iter().filter(|g| g.winner == Some(Side::Red)).count();
    let blue_wins = games
        .iter()
        .filter(|g| g.winner == Some(Side::Blue))
        .count();
    let draws = games
        .iter()
        .filter(|g| g.reason.is_some() && g.winner.is_none())
        .count();

    let total_moves: u32 = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    PlayResults {
        games,
        red_wins,
        blue_wins,
        draws,
        avg_moves,
    }
}

fn report_results(results: &PlayResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

fn print_json_results(results: &PlayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first: String,
        winner: Option<String>,
        reason: Option<String>,
        moves: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                first: format!("{:?}", g.first),
                winner: g.winner.map(|w| format!("{:?}", w)),
                reason: g.reason.map(|r| format!("{:?}", r)),
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &PlayResults) {
    let total = results.games.len();
    let pct = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Self-Play Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {} ({:.1}%)", results.red_wins, pct(results.red_wins));
    println!("Blue wins:   {} ({:.1}%)", results.blue_wins, pct(results.blue_wins));
    println!("Draws:       {} ({:.1}%)", results.draws, pct(results.draws));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: first={:?} winner={:?} reason={:?} in {} moves",
            game.game_number, game.first, game.winner, game.reason, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
