//! Board state machine for 2048.
//!
//! - [`line`]: the single line compactor where merge and scoring rules live.
//! - [`state`]: the 4x4 [`Board`] built on top of it (moves, spawning, terminal check).
//!
//! Quick start:
//! ```
//! use council_2048::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::new(&mut rng);
//! assert_eq!(board.count_empty(), 14);
//! let outcome = board.make_move(Direction::Left, &mut rng);
//! assert!(outcome.changed || outcome.score_gained == 0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod line;
pub mod state;

pub use line::{compact, compactable, Cell, Line};
pub use state::{Board, BoardError, Fields, MoveOutcome};

/// A direction to move/merge tiles.
///
/// Declaration order is the canonical order used for every tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions in canonical order.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Position of this direction in [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// The wire token for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// True for moves that compact columns instead of rows.
    #[inline]
    pub fn is_vertical(self) -> bool { matches!(self, Direction::Up | Direction::Down) }

    /// True for moves that scan lines from the far end.
    #[inline]
    pub fn is_reversed(self) -> bool { matches!(self, Direction::Right | Direction::Down) }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(BoardError::InvalidDirection(other.to_string())),
        }
    }
}
