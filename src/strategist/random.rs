use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::{Direction, Fields};

use super::{StrategyConfig, Strategist, StrategyError};

/// Picks choices and vetoes uniformly at random, independently of each other.
#[derive(Debug, Clone)]
pub struct RandomStrategist {
    cfg: StrategyConfig,
    rng: StdRng,
}

impl RandomStrategist {
    pub fn new(cfg: StrategyConfig, seed: u64) -> Self { Self { cfg, rng: StdRng::seed_from_u64(seed) } }
}

impl Strategist for RandomStrategist {
    fn name(&self) -> &'static str { "random" }

    fn choice(&mut self, _fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        Ok(sample(&self.cfg.directions, k, &mut self.rng))
    }

    fn veto(&mut self, _fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        Ok(sample(&self.cfg.directions, k, &mut self.rng))
    }
}

/// A random strategist that never vetoes what it just chose.
///
/// Each `choice` leaves the remaining directions open for the next `veto`.
/// Before any choice there is nothing to veto.
#[derive(Debug, Clone)]
pub struct SelfConsistentRandomStrategist {
    cfg: StrategyConfig,
    rng: StdRng,
    open_vetoes: Vec<Direction>,
}

impl SelfConsistentRandomStrategist {
    pub fn new(cfg: StrategyConfig, seed: u64) -> Self {
        Self { cfg, rng: StdRng::seed_from_u64(seed), open_vetoes: Vec::new() }
    }
}

impl Strategist for SelfConsistentRandomStrategist {
    fn name(&self) -> &'static str { "self-consistent-random" }

    fn choice(&mut self, _fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        let chosen = sample(&self.cfg.directions, k, &mut self.rng);
        self.open_vetoes = self.cfg.directions.iter().copied().filter(|d| !chosen.contains(d)).collect();
        Ok(chosen)
    }

    fn veto(&mut self, _fields: &Fields, k: usize) -> Result<Vec<Direction>, StrategyError> {
        Ok(sample(&self.open_vetoes, k, &mut self.rng))
    }
}

fn sample<R: Rng + ?Sized>(pool: &[Direction], k: usize, rng: &mut R) -> Vec<Direction> {
    pool.choose_multiple(rng, k).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: Fields = [None; 16];

    #[test]
    fn random_choice_has_no_repeats() {
        let mut s = RandomStrategist::new(StrategyConfig::default(), 1);
        for k in 0..=6 {
            let mut c = s.choice(&FIELDS, k).unwrap();
            assert_eq!(c.len(), k.min(4));
            c.sort();
            c.dedup();
            assert_eq!(c.len(), k.min(4));
        }
    }

    #[test]
    fn random_veto_may_overlap_choice() {
        let mut s = RandomStrategist::new(StrategyConfig::default(), 8);
        let overlapped = (0..200).any(|_| {
            let c = s.choice(&FIELDS, 2).unwrap();
            let v = s.veto(&FIELDS, 2).unwrap();
            v.iter().any(|d| c.contains(d))
        });
        assert!(overlapped);
    }

    #[test]
    fn self_consistent_never_vetoes_its_choice() {
        for seed in 0..100 {
            let mut s = SelfConsistentRandomStrategist::new(StrategyConfig::default(), seed);
            for k in 0..=5 {
                let c = s.choice(&FIELDS, k).unwrap();
                let v = s.veto(&FIELDS, k).unwrap();
                assert!(v.iter().all(|d| !c.contains(d)), "seed {seed} k {k}: {c:?} vs {v:?}");
                assert_eq!(v.len(), k.min(4 - c.len()));
            }
        }
    }

    #[test]
    fn self_consistent_has_no_veto_before_choosing() {
        let mut s = SelfConsistentRandomStrategist::new(StrategyConfig::default(), 4);
        assert!(s.veto(&FIELDS, 3).unwrap().is_empty());
    }

    #[test]
    fn candidates_come_from_config() {
        let cfg = StrategyConfig { directions: vec![Direction::Up, Direction::Left], parallel: false };
        let mut s = RandomStrategist::new(cfg, 3);
        for _ in 0..20 {
            assert!(s.choice(&FIELDS, 4).unwrap().iter().all(|d| matches!(d, Direction::Up | Direction::Left)));
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = RandomStrategist::new(StrategyConfig::default(), 42);
        let mut b = RandomStrategist::new(StrategyConfig::default(), 42);
        for _ in 0..10 {
            assert_eq!(a.choice(&FIELDS, 2).unwrap(), b.choice(&FIELDS, 2).unwrap());
        }
    }
}
