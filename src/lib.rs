//! council-2048: a 2048 engine played by a voting council of strategists
//!
//! This crate provides:
//! - A `Board` type over 16 optional cells with pure `shift` and spawning `make_move`
//! - Strategists (`strategist` module) that vote with choices and vetoes
//! - An `Arbiter` that tallies the votes into one move
//! - A request/reply game loop (`session`, `player`) over line-framed channels (`transport`)
//!
//! Quick start:
//! ```
//! use council_2048::arbiter::{Arbiter, ArbiterConfig};
//! use council_2048::engine::Board;
//! use council_2048::strategist::{StrategistKind, StrategyConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::new(&mut rng);
//! assert_eq!(board.count_empty(), 14);
//!
//! let kinds = [StrategistKind::PointMaximizer, StrategistKind::Sweeper];
//! let mut council = Arbiter::from_kinds(&kinds, ArbiterConfig::default(), StrategyConfig::default(), 42);
//! let dir = council.make_a_move(board.fields()).unwrap();
//! let outcome = board.make_move(dir, &mut rng);
//! assert!(board.tile_sum() >= 4 + u64::from(outcome.changed) * 2);
//! ```
//!
//! Note: strategists only ever simulate with `shift`, which never spawns a tile.
//! Randomness enters the game through `make_move` and `Board::new` alone.
//!
pub mod arbiter;
pub mod engine;
pub mod player;
pub mod protocol;
pub mod session;
pub mod strategist;
pub mod transport;

/// Initialize terminal logging. `RUST_LOG` overrides the default `info` level.
pub fn log() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
