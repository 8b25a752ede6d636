use council_2048::arbiter::{Arbiter, ArbiterConfig};
use council_2048::engine::{Board, Direction};
use council_2048::strategist::{branch_evals, AnyStrategist, StrategistKind, Strategist, StrategyConfig};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rayon::ThreadPoolBuilder;
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(7777);
    let mut boards = Vec::new();
    let mut b = Board::new(&mut rng);
    boards.push(b);
    for i in 0..64 {
        b.make_move(Direction::ALL[i % 4], &mut rng);
        if b.is_terminal() { b = Board::new(&mut rng); }
        boards.push(b);
    }
    boards
}

fn bench_votes(c: &mut Criterion) {
    let boards = corpus();
    for kind in StrategistKind::ALL {
        let mut s = AnyStrategist::from_kind(kind, StrategyConfig::default(), 1);
        c.bench_function(&format!("vote/{kind}"), |bch| {
            bch.iter(|| {
                let mut acc = 0usize;
                for bd in &boards {
                    if let Ok(v) = s.vote(bd.fields(), 2, 1) { acc += v.choice.len() + v.veto.len(); }
                }
                black_box(acc)
            })
        });
    }
}

fn bench_branch_evals(c: &mut Criterion) {
    // Pin a small pool for stability
    let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let boards = corpus();
    for parallel in [false, true] {
        let name = if parallel { "simulate/branch_evals_par" } else { "simulate/branch_evals_seq" };
        c.bench_function(name, |bch| {
            bch.iter(|| pool.install(|| {
                let mut acc = 0u32;
                for bd in &boards {
                    for be in branch_evals(bd, &Direction::ALL, parallel) { acc = acc.wrapping_add(be.score_gained); }
                }
                black_box(acc)
            }))
        });
    }
}

fn bench_council_e2e(c: &mut Criterion) {
    let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let kinds = [StrategistKind::PointMaximizer, StrategistKind::Sweeper, StrategistKind::SelfConsistentRandom];
    for parallel in [false, true] {
        let name = if parallel { "e2e/council_par_64_moves" } else { "e2e/council_seq_64_moves" };
        c.bench_function(name, |bch| {
            bch.iter(|| pool.install(|| {
                let cfg = ArbiterConfig { choices: 2, vetoes: 1, parallel };
                let mut arbiter = Arbiter::from_kinds(&kinds, cfg, StrategyConfig { parallel, ..Default::default() }, 13);
                let mut rng = StdRng::seed_from_u64(13);
                let mut b = Board::new(&mut rng);
                let mut steps = 0;
                while steps < 64 && !b.is_terminal() {
                    let Ok(dir) = arbiter.make_a_move(b.fields()) else { break };
                    b.make_move(dir, &mut rng);
                    steps += 1;
                }
                black_box((b, steps))
            }))
        });
    }
}

criterion_group!(strategists, bench_votes, bench_branch_evals, bench_council_e2e);
criterion_main!(strategists);
