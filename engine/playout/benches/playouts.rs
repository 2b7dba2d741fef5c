use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use games_ultimate::{Board, Player};
use playout::{choose_move, simulate_playout, PlayoutConfig, Strategy, TrialBudget};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout_simulate");
    group.bench_function("full_game_from_opening", |b| {
        let board = Board::new();
        let first = board.legal_moves(None).nth(40).unwrap();
        b.iter_batched(
            || ChaCha20Rng::seed_from_u64(42),
            |mut rng| simulate_playout(board, first, Player::X, &mut rng).unwrap(),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_choose_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout_choose_move");
    group.sample_size(20);

    for workers in [1usize, 4] {
        group.bench_function(format!("fixed_1000_workers_{workers}"), |b| {
            let board = Board::new();
            let legal = board.legal_moves(None);
            let config = PlayoutConfig::default()
                .with_budget(TrialBudget::Fixed(1_000))
                .with_strategies(vec![Strategy::RandomPlayout])
                .with_workers(workers);
            b.iter_batched(
                || ChaCha20Rng::seed_from_u64(7),
                |mut rng| choose_move(&board, &legal, Player::X, &config, &mut rng).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_simulate, bench_choose_move);
criterion_main!(benches);
