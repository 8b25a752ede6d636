use crate::engine::{Board, Direction, Fields};

use super::simulate::{branch_evals, rank_descending};
use super::{StrategyConfig, Strategist, StrategyError};

/// Tries to free as many cells as possible.
///
/// Vetoes every move that would not free at least one cell, in canonical order.
#[derive(Debug, Clone)]
pub struct Sweeper {
    cfg: StrategyConfig,
}

impl Sweeper {
    pub fn new(cfg: StrategyConfig) -> Self { Self { cfg } }
}

impl Strategist for Sweeper {
    fn name(&self) -> &'static str { "sweeper" }

    fn choice(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        let board = Board::from_fields(*fields)?;
        let evals = branch_evals(&board, &self.cfg.directions, self.cfg.parallel);
        let mut ranked = rank_descending(&evals, |b| b.empty_after);
        ranked.truncate(k);
        Ok(ranked)
    }

    fn veto(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        let board = Board::from_fields(*fields)?;
        let empty_before = board.count_empty();
        let mut stuck: Vec<Direction> = branch_evals(&board, &self.cfg.directions, self.cfg.parallel)
            .into_iter()
            .filter(|b| b.empty_after <= empty_before)
            .map(|b| b.dir)
            .collect();
        stuck.sort();
        stuck.truncate(k);
        Ok(stuck)
    }
}
