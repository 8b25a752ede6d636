use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::{Board, Direction, Fields};

use super::simulate::{branch_evals, rank_descending, BranchEval};
use super::{StrategyConfig, Strategist, StrategyError};

/// Prefers the moves that score the most points right now.
///
/// Vetoes are drawn at random among the moves that would score nothing.
#[derive(Debug, Clone)]
pub struct PointMaximizer {
    cfg: StrategyConfig,
    rng: StdRng,
}

impl PointMaximizer {
    pub fn new(cfg: StrategyConfig, seed: u64) -> Self { Self { cfg, rng: StdRng::seed_from_u64(seed) } }

    fn evals(&self, fields: &Fields) -> Result<Vec<BranchEval>, StrategyError> {
        let board = Board::from_fields(*fields)?;
        Ok(branch_evals(&board, &self.cfg.directions, self.cfg.parallel))
    }
}

impl Strategist for PointMaximizer {
    fn name(&self) -> &'static str { "point-maximizer" }

    fn choice(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        let mut ranked = rank_descending(&self.evals(fields)?, |b| b.score_gained);
        ranked.truncate(k);
        Ok(ranked)
    }

    fn veto(&mut self, fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        let pointless: Vec<Direction> = self
            .evals(fields)?
            .into_iter()
            .filter(|b| b.score_gained == 0)
            .map(|b| b.dir)
            .collect();
        Ok(pointless.choose_multiple(&mut self.rng, k).copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fields(vals: [u32; 16]) -> Fields { vals.map(|v| if v == 0 { None } else { Some(v) }) }

    fn set(dirs: &[Direction]) -> HashSet<Direction> { dirs.iter().copied().collect() }

    const VERTICAL_MERGES: [u32; 16] = [
        8, 4, 4, 8,
        4, 2, 2, 4,
        32, 4, 4, 8,
        32, 2, 2, 4,
    ];

    const HORIZONTAL_MERGES: [u32; 16] = [
        4, 8, 32, 32,
        2, 4, 2, 4,
        2, 4, 2, 4,
        4, 8, 4, 8,
    ];

    #[test]
    fn it_chooses_the_best_scoring_moves() {
        let mut pm = PointMaximizer::new(StrategyConfig::default(), 0);
        assert_eq!(pm.choice(&fields(VERTICAL_MERGES), 2).unwrap(), vec![Direction::Up, Direction::Down]);
        assert_eq!(pm.choice(&fields(HORIZONTAL_MERGES), 2).unwrap(), vec![Direction::Left, Direction::Right]);
        assert_eq!(
            pm.choice(&fields(VERTICAL_MERGES), 4).unwrap(),
            vec![Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn it_vetoes_pointless_moves() {
        let mut pm = PointMaximizer::new(StrategyConfig::default(), 0);
        let stacked = fields([16, 16, 16, 16, 8, 8, 8, 8, 4, 4, 4, 4, 2, 2, 2, 2]);
        assert_eq!(set(&pm.veto(&stacked, 2).unwrap()), set(&[Direction::Up, Direction::Down]));
        let striped = fields([2, 4, 8, 16, 2, 4, 8, 16, 2, 4, 8, 16, 2, 4, 8, 16]);
        assert_eq!(set(&pm.veto(&striped, 2).unwrap()), set(&[Direction::Left, Direction::Right]));
    }

    #[test]
    fn it_has_no_veto_when_every_move_scores() {
        let mut pm = PointMaximizer::new(StrategyConfig::default(), 0);
        assert!(pm.veto(&fields(VERTICAL_MERGES), 2).unwrap().is_empty());
    }

    #[test]
    fn veto_is_capped() {
        let mut pm = PointMaximizer::new(StrategyConfig::default(), 5);
        let striped = fields([2, 4, 8, 16, 2, 4, 8, 16, 2, 4, 8, 16, 2, 4, 8, 16]);
        for _ in 0..20 {
            let v = pm.veto(&striped, 1).unwrap();
            assert_eq!(v.len(), 1);
            assert!(matches!(v[0], Direction::Left | Direction::Right));
        }
        let empty = [None; 16];
        assert_eq!(set(&pm.veto(&empty, 4).unwrap()), set(&Direction::ALL));
    }

    #[test]
    fn parallel_evaluation_agrees() {
        let mut seq = PointMaximizer::new(StrategyConfig::default(), 0);
        let mut par = PointMaximizer::new(StrategyConfig { parallel: true, ..Default::default() }, 0);
        for vals in [VERTICAL_MERGES, HORIZONTAL_MERGES] {
            assert_eq!(seq.choice(&fields(vals), 4).unwrap(), par.choice(&fields(vals), 4).unwrap());
        }
    }

    #[test]
    fn it_rejects_invalid_fields() {
        let mut pm = PointMaximizer::new(StrategyConfig::default(), 0);
        let mut bad = [None; 16];
        bad[0] = Some(3);
        assert!(matches!(pm.choice(&bad, 1), Err(StrategyError::Board(_))));
    }
}
