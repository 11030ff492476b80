//! Arena CLI: run many automated games and report per-seat statistics.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 1000 --picker random
//!   cargo run --release --bin arena -- --games 500 --three-sixes --forfeit-rate 0.01

use std::path::PathBuf;

use clap::Parser;

use ludo_game_engine::engine::arena::run_arena;
use ludo_game_engine::engine::config::{load_default_rules, load_rules};
use ludo_game_engine::engine::picker::{picker_by_name, PICKER_NAMES};
use ludo_game_engine::engine::simulator::SimParams;

#[derive(Parser)]
#[command(name = "arena", about = "Run batches of automated Ludo games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Token picker: "first", "random" or "furthest"
    #[arg(long, default_value = "random")]
    picker: String,

    /// Path to ludo_rules.toml
    #[arg(long, env = "LUDO_RULES")]
    rules: Option<PathBuf>,

    /// Enable the three-sixes rule
    #[arg(long)]
    three_sixes: bool,

    /// Chance per roll that the player on turn forfeits instead
    #[arg(long, default_value = "0.0")]
    forfeit_rate: f64,

    /// Abandon a game after this many actions
    #[arg(long, default_value = "20000")]
    max_actions: usize,
}

fn main() {
    let cli = Cli::parse();

    let mut rules = match &cli.rules {
        Some(path) => load_rules(path).unwrap_or_else(|e| {
            eprintln!("Error loading rules: {}", e);
            std::process::exit(1);
        }),
        None => load_default_rules(),
    };
    rules.three_sixes_skip_turn |= cli.three_sixes;

    let picker = picker_by_name(&cli.picker).unwrap_or_else(|| {
        eprintln!("Error: unknown picker '{}'", cli.picker);
        eprintln!("Available pickers: {:?}", PICKER_NAMES);
        std::process::exit(1);
    });
    if !(0.0..=1.0).contains(&cli.forfeit_rate) {
        eprintln!("Error: --forfeit-rate must be within 0.0..=1.0");
        std::process::exit(1);
    }

    let params = SimParams {
        max_actions: cli.max_actions,
        forfeit_rate: cli.forfeit_rate,
    };

    eprintln!(
        "Arena: {} games, seed={}, picker={}, three_sixes={}, forfeit_rate={}",
        cli.games,
        cli.seed,
        picker.name(),
        rules.three_sixes_skip_turn,
        cli.forfeit_rate
    );
    eprintln!();

    let progress_cb = |done: usize, total: usize| {
        eprint!("\r  [{}/{}] games completed", done, total);
    };

    let result = run_arena(
        &rules,
        picker.as_ref(),
        cli.games,
        cli.seed,
        &params,
        Some(&progress_cb),
    );

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
    if !result.failed_games.is_empty() {
        std::process::exit(2);
    }
}
