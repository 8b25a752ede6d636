use clap::Parser;
use council_2048::arbiter::{Arbiter, ArbiterConfig};
use council_2048::player::{GameRecord, PlayConfig, Player};
use council_2048::strategist::{StrategistKind, StrategyConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    council_2048::log();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let arbiter_cfg = ArbiterConfig { choices: args.choices, vetoes: args.vetoes, parallel: false };
    let play_cfg = PlayConfig { max_moves: args.max_moves, stall_limit: args.stall_limit };
    log::info!("{:<24}{:?} x{} (seed {})", "selfplay council", args.strategist, args.games, seed);

    // One seed per game, drawn up front so results do not depend on scheduling
    let mut seeder = StdRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..args.games).map(|_| seeder.gen()).collect();

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise} | {msg}")?
                .progress_chars("=> "),
        );
        pb
    };

    let start = Instant::now();
    let records = seeds
        .par_iter()
        .map(|&game_seed| {
            let mut rng = StdRng::seed_from_u64(game_seed);
            let arbiter = Arbiter::from_kinds(&args.strategist, arbiter_cfg, StrategyConfig::default(), rng.gen());
            let record = Player::new(arbiter).play_game(play_cfg, &mut rng);
            if let Ok(r) = &record {
                pb.inc(1);
                pb.set_message(format!("last score: {}", r.score));
            }
            record
        })
        .collect::<Result<Vec<GameRecord>, _>>()?;
    pb.finish_and_clear();

    let summary = Summary::from_records(&records);
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    if args.json {
        println!("{}", serde_json::to_string(&records)?);
    }
    println!(
        "Games: {} | mean score: {:.1} | best score: {} | highest tile: {} | stalled: {} | games/sec: {:.1}",
        records.len(),
        summary.mean_score,
        summary.best_score,
        summary.highest_tile,
        summary.stalled,
        (records.len() as f64) / elapsed
    );
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Local 2048 games played by a strategist council on the rayon pool")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Council members; repeat the flag to add more
    #[arg(long, value_enum, num_args = 1.., default_values_t = [StrategistKind::PointMaximizer, StrategistKind::Sweeper])]
    strategist: Vec<StrategistKind>,

    /// Choices cast by each strategist
    #[arg(long, default_value_t = 1)]
    choices: usize,

    /// Vetoes cast by each strategist
    #[arg(long, default_value_t = 1)]
    vetoes: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Stop each game after this many moves
    #[arg(long)]
    max_moves: Option<u64>,

    /// End a game after this many consecutive moves that change nothing
    #[arg(long, default_value_t = 16)]
    stall_limit: u32,

    /// Print every game record as JSON before the summary
    #[arg(long)]
    json: bool,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Default)]
struct Summary {
    mean_score: f64,
    best_score: u64,
    highest_tile: u32,
    stalled: usize,
}

impl Summary {
    fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total: u64 = records.iter().map(|r| r.score).sum();
        Self {
            mean_score: total as f64 / records.len() as f64,
            best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
            highest_tile: records.iter().map(|r| r.highest_tile).max().unwrap_or(0),
            stalled: records.iter().filter(|r| r.stalled).count(),
        }
    }
}
