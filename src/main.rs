use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use ludo_game_engine::engine::config::{load_default_rules, load_rules};
use ludo_game_engine::engine::picker::{picker_by_name, PICKER_NAMES};
use ludo_game_engine::engine::simulator::{play_game, SimParams};
use ludo_game_engine::games::ludo::Game;

#[derive(Parser)]
#[command(
    name = "ludo-game-engine",
    about = "Play one automated Ludo game and print the final board"
)]
struct Cli {
    /// Dice seed (overrides the rules file)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to ludo_rules.toml (default: auto-discover)
    #[arg(long, env = "LUDO_RULES")]
    rules: Option<PathBuf>,

    /// Enable the three-sixes rule
    #[arg(long)]
    three_sixes: bool,

    /// Token picker: "first", "random" or "furthest"
    #[arg(long, default_value = "random")]
    picker: String,

    /// Give up after this many actions
    #[arg(long, default_value = "20000")]
    max_actions: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => load_default_rules(),
    };
    if cli.seed.is_some() {
        rules.random_seed = cli.seed;
    }
    rules.three_sixes_skip_turn |= cli.three_sixes;

    let picker = picker_by_name(&cli.picker).ok_or_else(|| {
        format!(
            "unknown picker '{}', expected one of {:?}",
            cli.picker, PICKER_NAMES
        )
    })?;
    let seed = rules.random_seed.unwrap_or_else(rand::random);
    rules.random_seed = Some(seed);
    tracing::info!(
        seed,
        picker = picker.name(),
        three_sixes = rules.three_sixes_skip_turn,
        "starting game"
    );

    let mut game = Game::new(&rules);
    let mut rng = StdRng::seed_from_u64(seed);
    let params = SimParams {
        max_actions: cli.max_actions,
        ..SimParams::default()
    };
    let record = play_game(&mut game, picker.as_ref(), &mut rng, &params);

    if !record.violations.is_empty() {
        for v in &record.violations {
            tracing::error!(violation = %v, "invariant broken");
        }
        let broken = record.violations.len();
        return Err(format!("game with seed {seed} broke {broken} invariant(s)").into());
    }
    tracing::info!(
        completed = record.completed,
        turns = record.turns,
        rolls = record.rolls,
        ranking = ?record.ranking,
        "game ended"
    );

    let snapshot = game.snapshot().to_json()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
