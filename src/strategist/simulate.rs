use std::cmp::Reverse;

use rayon::prelude::*;

use crate::engine::{Board, Direction};

/// What a single direction would do to a board.
///
/// `changed` is false when the move is a no-op for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchEval {
    pub dir: Direction,
    pub score_gained: u32,
    pub empty_after: usize,
    pub changed: bool,
}

/// Simulate every direction on a private copy of `board`.
///
/// Results come back in the order of `directions` whether or not the
/// simulations ran in parallel.
pub fn branch_evals(board: &Board, directions: &[Direction], parallel: bool) -> Vec<BranchEval> {
    let eval = |&dir: &Direction| {
        let (after, outcome) = board.shift(dir);
        BranchEval {
            dir,
            score_gained: outcome.score_gained,
            empty_after: after.count_empty(),
            changed: outcome.changed,
        }
    };
    if parallel {
        directions.par_iter().map(eval).collect()
    } else {
        directions.iter().map(eval).collect()
    }
}

/// Directions sorted by `key`, highest first, ties in canonical order.
pub fn rank_descending<K, F>(evals: &[BranchEval], key: F) -> Vec<Direction>
where
    K: Ord,
    F: Fn(&BranchEval) -> K,
{
    let mut ranked: Vec<&BranchEval> = evals.iter().collect();
    ranked.sort_by_key(|b| (Reverse(key(b)), b.dir));
    ranked.into_iter().map(|b| b.dir).collect()
}
