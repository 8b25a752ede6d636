//! Strategists: advisors that rank and veto moves for a given board.
//!
//! Every strategist implements the [`Strategist`] capability. The concrete
//! variants are gathered in the [`AnyStrategist`] enum so the
//! [`Arbiter`](crate::arbiter::Arbiter) can hold a mixed council without trait objects.
//!
//! Strategists never mutate the board they are shown. Look-ahead runs on
//! copies through [`Board::shift`](crate::engine::Board::shift), optionally
//! on the rayon pool (see [`StrategyConfig::parallel`]).
//!
//! ```
//! use council_2048::engine::{Board, Direction};
//! use council_2048::strategist::{PointMaximizer, StrategyConfig, Strategist};
//!
//! let fields = Board::from_fields([
//!     Some(8), Some(4), Some(4), Some(8),
//!     Some(4), Some(2), Some(2), Some(4),
//!     Some(32), Some(4), Some(4), Some(8),
//!     Some(32), Some(2), Some(2), Some(4),
//! ]).unwrap().into_fields();
//! let mut pm = PointMaximizer::new(StrategyConfig::default(), 7);
//! assert_eq!(pm.choice(&fields, 2).unwrap(), vec![Direction::Up, Direction::Down]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::{BoardError, Direction, Fields};

mod point_maximizer;
mod random;
mod simulate;
mod sweeper;

pub use point_maximizer::PointMaximizer;
pub use random::{RandomStrategist, SelfConsistentRandomStrategist};
pub use simulate::{branch_evals, rank_descending, BranchEval};
pub use sweeper::Sweeper;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("strategist '{0}' has no strategy; use one of the concrete strategists")]
    NotImplemented(&'static str),
    #[error("strategist '{name}' returned a malformed {kind}: {detail}")]
    MalformedVote { name: &'static str, kind: &'static str, detail: String },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Immutable knobs shared by all strategists.
///
/// - `directions`: candidate moves, in the order they are considered.
/// - `parallel`: run the per-direction simulations on the rayon pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub directions: Vec<Direction>,
    pub parallel: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self { Self { directions: Direction::ALL.to_vec(), parallel: false } }
}

/// The capability every strategist offers.
///
/// `choice` lists at most `k` directions, most preferred first; `veto` lists
/// at most `k` directions, most discouraged first. The default bodies fail
/// with [`StrategyError::NotImplemented`].
pub trait Strategist {
    fn name(&self) -> &'static str;

    fn choice(&mut self, _fields: &Fields, _k: usize) -> Result<Vec<Direction>, StrategyError> {
        Err(StrategyError::NotImplemented(self.name()))
    }

    fn veto(&mut self, _fields: &Fields, _k: usize) -> Result<Vec<Direction>, StrategyError> {
        Err(StrategyError::NotImplemented(self.name()))
    }

    /// Ask for a choice, then a veto, and check both against the vote contract.
    fn vote(&mut self, fields: &Fields, choices: usize, vetoes: usize) -> Result<Vote, StrategyError> {
        let choice = self.choice(fields, choices)?;
        let veto = self.veto(fields, vetoes)?;
        let vote = Vote { choice, veto };
        vote.validate(self.name(), choices, vetoes)?;
        Ok(vote)
    }
}

/// One strategist's ballot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub choice: Vec<Direction>,
    pub veto: Vec<Direction>,
}

impl Vote {
    /// Reject lists that are too long or repeat a direction.
    pub fn validate(&self, name: &'static str, choices: usize, vetoes: usize) -> Result<(), StrategyError> {
        check_list(name, "choice", &self.choice, choices)?;
        check_list(name, "veto", &self.veto, vetoes)
    }
}

fn check_list(name: &'static str, kind: &'static str, list: &[Direction], cap: usize) -> Result<(), StrategyError> {
    if list.len() > cap {
        return Err(StrategyError::MalformedVote {
            name,
            kind,
            detail: format!("{} entries for a cap of {}", list.len(), cap),
        });
    }
    let mut seen = [false; 4];
    for dir in list {
        if std::mem::replace(&mut seen[dir.index()], true) {
            return Err(StrategyError::MalformedVote { name, kind, detail: format!("'{dir}' listed twice") });
        }
    }
    Ok(())
}

/// Names of the concrete strategists, for CLI and config selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategistKind {
    Random,
    SelfConsistentRandom,
    PointMaximizer,
    Sweeper,
}

impl StrategistKind {
    pub const ALL: [StrategistKind; 4] = [
        StrategistKind::Random,
        StrategistKind::SelfConsistentRandom,
        StrategistKind::PointMaximizer,
        StrategistKind::Sweeper,
    ];
}

impl fmt::Display for StrategistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategistKind::Random => "random",
            StrategistKind::SelfConsistentRandom => "self-consistent-random",
            StrategistKind::PointMaximizer => "point-maximizer",
            StrategistKind::Sweeper => "sweeper",
        };
        f.write_str(name)
    }
}

/// Any concrete strategist, dispatched statically.
#[derive(Debug, Clone)]
pub enum AnyStrategist {
    Random(RandomStrategist),
    SelfConsistentRandom(SelfConsistentRandomStrategist),
    PointMaximizer(PointMaximizer),
    Sweeper(Sweeper),
}

impl AnyStrategist {
    /// Build the strategist named by `kind`; `seed` feeds its private RNG.
    pub fn from_kind(kind: StrategistKind, config: StrategyConfig, seed: u64) -> Self {
        match kind {
            StrategistKind::Random => AnyStrategist::Random(RandomStrategist::new(config, seed)),
            StrategistKind::SelfConsistentRandom => {
                AnyStrategist::SelfConsistentRandom(SelfConsistentRandomStrategist::new(config, seed))
            }
            StrategistKind::PointMaximizer => AnyStrategist::PointMaximizer(PointMaximizer::new(config, seed)),
            StrategistKind::Sweeper => AnyStrategist::Sweeper(Sweeper::new(config)),
        }
    }

    pub fn kind(&self) -> StrategistKind {
        match self {
            AnyStrategist::Random(_) => StrategistKind::Random,
            AnyStrategist::SelfConsistentRandom(_) => StrategistKind::SelfConsistentRandom,
            AnyStrategist::PointMaximizer(_) => StrategistKind::PointMaximizer,
            AnyStrategist::Sweeper(_) => StrategistKind::Sweeper,
        }
    }
}

impl Strategist for AnyStrategist {
    fn name(&self) -> &'static str {
        match self {
            AnyStrategist::Random(s) => s.name(),
            AnyStrategist::SelfConsistentRandom(s) => s.name(),
            AnyStrategist::PointMaximizer(s) => s.name(),
            AnyStrategist::Sweeper(s) => s.name(),
        }
    }

    fn choice(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        match self {
            AnyStrategist::Random(s) => s.choice(fields, k),
            AnyStrategist::SelfConsistentRandom(s) => s.choice(fields, k),
            AnyStrategist::PointMaximizer(s) => s.choice(fields, k),
            AnyStrategist::Sweeper(s) => s.choice(fields, k),
        }
    }

    fn veto(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        match self {
            AnyStrategist::Random(s) => s.veto(fields, k),
            AnyStrategist::SelfConsistentRandom(s) => s.veto(fields, k),
            AnyStrategist::PointMaximizer(s) => s.veto(fields, k),
            AnyStrategist::Sweeper(s) => s.veto(fields, k),
        }
    }
}
