//! The arbiter: turns a council of strategist votes into one move.
//!
//! Each strategist adds +1 to every direction it chooses and -1 to every
//! direction it vetoes. The direction with the highest tally wins; ties go
//! to the canonical order Left, Right, Up, Down. With no strategists the
//! arbiter falls back to a uniformly random direction.
//!
//! ```
//! use council_2048::arbiter::{Arbiter, ArbiterConfig};
//! use council_2048::engine::{Board, Direction};
//! use council_2048::strategist::{StrategistKind, StrategyConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let board = Board::new(&mut rng);
//! let mut arbiter = Arbiter::from_kinds(
//!     &[StrategistKind::PointMaximizer, StrategistKind::Sweeper],
//!     ArbiterConfig::default(),
//!     StrategyConfig::default(),
//!     42,
//! );
//! let dir = arbiter.make_a_move(board.fields()).unwrap();
//! assert!(Direction::ALL.contains(&dir));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::engine::{Direction, Fields};
use crate::strategist::{AnyStrategist, StrategistKind, StrategyConfig, Strategist, StrategyError, Vote};

/// How many choices and vetoes each strategist casts, and whether the
/// council is consulted on the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbiterConfig {
    pub choices: usize,
    pub vetoes: usize,
    pub parallel: bool,
}

impl Default for ArbiterConfig {
    fn default() -> Self { Self { choices: 1, vetoes: 1, parallel: false } }
}

/// Net votes per direction, indexed in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally([i32; 4]);

impl Tally {
    #[inline]
    pub fn get(&self, dir: Direction) -> i32 { self.0[dir.index()] }

    pub fn add(&mut self, vote: &Vote) {
        for dir in &vote.choice {
            self.0[dir.index()] += 1;
        }
        for dir in &vote.veto {
            self.0[dir.index()] -= 1;
        }
    }

    /// The highest tally; the earliest direction in canonical order wins ties.
    pub fn winner(&self) -> Direction {
        let mut best = Direction::ALL[0];
        for dir in Direction::ALL {
            if self.get(dir) > self.get(best) {
                best = dir;
            }
        }
        best
    }
}

/// Aggregates the votes of its strategists into a single direction.
#[derive(Debug, Clone)]
pub struct Arbiter {
    strategists: Vec<AnyStrategist>,
    cfg: ArbiterConfig,
    rng: StdRng,
}

impl Arbiter {
    pub fn new(strategists: Vec<AnyStrategist>, cfg: ArbiterConfig, seed: u64) -> Self {
        Self { strategists, cfg, rng: StdRng::seed_from_u64(seed) }
    }

    /// Build a council from strategist names. Each member gets its own seed
    /// derived from `seed`, so the whole council is reproducible.
    pub fn from_kinds(kinds: &[StrategistKind], cfg: ArbiterConfig, strategy: StrategyConfig, seed: u64) -> Self {
        let mut seeder = StdRng::seed_from_u64(seed);
        let strategists = kinds
            .iter()
            .map(|&kind| AnyStrategist::from_kind(kind, strategy.clone(), seeder.gen()))
            .collect();
        Self::new(strategists, cfg, seeder.gen())
    }

    pub fn strategists(&self) -> &[AnyStrategist] { &self.strategists }

    pub fn config(&self) -> &ArbiterConfig { &self.cfg }

    /// Collect one vote per strategist, in council order.
    pub fn votes(&mut self, fields: &Fields) -> Result<Vec<Vote>, StrategyError> {
        let ArbiterConfig { choices, vetoes, parallel } = self.cfg;
        if parallel {
            self.strategists.par_iter_mut().map(|s| s.vote(fields, choices, vetoes)).collect()
        } else {
            self.strategists.iter_mut().map(|s| s.vote(fields, choices, vetoes)).collect()
        }
    }

    pub fn tally(&mut self, fields: &Fields) -> Result<Tally, StrategyError> {
        let mut tally = Tally::default();
        for vote in self.votes(fields)? {
            tally.add(&vote);
        }
        Ok(tally)
    }

    /// Decide the next move for the board described by `fields`.
    pub fn make_a_move(&mut self, fields: &Fields) -> Result<Direction, StrategyError> {
        if self.strategists.is_empty() {
            // no council, no opinion
            return Ok(Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]);
        }
        let tally = self.tally(fields)?;
        let dir = tally.winner();
        log::debug!("{:<24}{:?} -> {}", "tally", tally, dir);
        Ok(dir)
    }
}
