//! Batch self-play runner: many seeded games in parallel, aggregated per seat.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::config::RulesConfig;
use crate::engine::picker::TokenPicker;
use crate::engine::simulator::{play_game, GameRecord, SimParams};
use crate::games::ludo::types::{Color, NUM_PLAYERS};
use crate::games::ludo::Game;

/// Keeps the picker's stream independent from the dice stream of the same seed.
const PICKER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Default)]
pub struct ArenaResult {
    pub num_games: usize,
    pub completed: usize,
    /// Games that broke an invariant or had an action rejected.
    pub failed_games: Vec<u64>,
    pub wins: [usize; NUM_PLAYERS],
    /// Final ranks per seat over the games the seat was ranked in.
    pub ranks: [Vec<u8>; NUM_PLAYERS],
    pub forfeits: [usize; NUM_PLAYERS],
    pub captures: [u64; NUM_PLAYERS],
    pub turns: Vec<usize>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, seat: usize) -> f64 {
        self.wins[seat] as f64 / self.completed.max(1) as f64
    }

    pub fn avg_rank(&self, seat: usize) -> f64 {
        let ranks = &self.ranks[seat];
        if ranks.is_empty() {
            return 0.0;
        }
        ranks.iter().map(|r| f64::from(*r)).sum::<f64>() / ranks.len() as f64
    }

    pub fn avg_turns(&self) -> f64 {
        if self.turns.is_empty() {
            return 0.0;
        }
        self.turns.iter().sum::<usize>() as f64 / self.turns.len() as f64
    }

    /// Wilson score interval for a seat's win rate.
    pub fn confidence_interval_95(&self, seat: usize) -> (f64, f64) {
        let n = self.completed;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(seat);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Arena Results ({} games, {} completed)",
            self.num_games, self.completed
        )];
        lines.push("=".repeat(72));
        for (seat, color) in Color::ALL.iter().enumerate() {
            let (ci_lo, ci_hi) = self.confidence_interval_95(seat);
            lines.push(format!(
                "  {:>7}: {:4} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg rank={:.2}  \
                 captures={}  forfeits={}",
                color.to_string(),
                self.wins[seat],
                self.win_rate(seat) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_rank(seat),
                self.captures[seat],
                self.forfeits[seat],
            ));
        }
        lines.push(format!("  Avg turns per game: {:.1}", self.avg_turns()));
        if !self.failed_games.is_empty() {
            lines.push(format!("  FAILED seeds: {:?}", self.failed_games));
        }
        if !self.game_durations_ms.is_empty() {
            let total_ms = self.game_durations_ms.iter().sum::<f64>();
            let avg_ms = total_ms / self.game_durations_ms.len() as f64;
            let total_s = total_ms / 1000.0;
            lines.push(format!("  Avg game: {:.2}ms  |  Total: {:.1}s", avg_ms, total_s));
        }
        lines.join("\n")
    }

    fn record(&mut self, seed: u64, record: &GameRecord, elapsed_ms: f64) {
        self.game_durations_ms.push(elapsed_ms);
        if !record.violations.is_empty() {
            tracing::error!(seed, violations = ?record.violations, "game failed");
            self.failed_games.push(seed);
            return;
        }
        for id in &record.forfeited {
            self.forfeits[id.index()] += 1;
        }
        for (seat, count) in record.captures.iter().enumerate() {
            self.captures[seat] += u64::from(*count);
        }
        if !record.completed {
            return;
        }
        self.completed += 1;
        self.turns.push(record.turns);
        if let Some(winner) = record.winner() {
            self.wins[winner.index()] += 1;
        }
        for (pos, id) in record.ranking.iter().enumerate() {
            self.ranks[id.index()].push((pos + 1) as u8);
        }
    }
}

/// Run `num_games` games with seeds `base_seed + i` and aggregate the results.
///
/// Games run on the rayon pool; results are folded in seed order so the
/// outcome does not depend on scheduling.
pub fn run_arena(
    rules: &RulesConfig,
    picker: &dyn TokenPicker,
    num_games: usize,
    base_seed: u64,
    params: &SimParams,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let done = AtomicUsize::new(0);

    let records: Vec<(u64, GameRecord, f64)> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = base_seed.wrapping_add(game_idx as u64);
            let game_rules = RulesConfig {
                random_seed: Some(seed),
                ..rules.clone()
            };
            let mut game = Game::new(&game_rules);
            let mut rng = StdRng::seed_from_u64(seed ^ PICKER_SEED_SALT);

            let t0 = Instant::now();
            let record = play_game(&mut game, picker, &mut rng, params);
            let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(finished, num_games);
            }
            (seed, record, elapsed_ms)
        })
        .collect();

    let mut result = ArenaResult {
        num_games,
        ..ArenaResult::default()
    };
    for (seed, record, elapsed_ms) in &records {
        result.record(*seed, record, *elapsed_ms);
    }
    result
}
