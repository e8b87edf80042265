use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tilepop_core::{GameConfig, Grid, PlayEngine, RandomTileGenerator};

fn bench_find_cluster(c: &mut Criterion) {
    let rows = ["AAAAAAAA"; 8];
    let grid = Grid::from_rows(&rows).unwrap();

    c.bench_function("find_cluster_full_8x8", |b| {
        b.iter(|| grid.find_cluster(black_box((3, 3))).unwrap())
    });
}

fn bench_has_any_valid_move(c: &mut Criterion) {
    // diagonal stripes, no cluster of three anywhere
    let rows = [
        "ABCDEABC", "BCDEABCD", "CDEABCDE", "DEABCDEA", "EABCDEAB", "ABCDEABC", "BCDEABCD",
        "CDEABCDE",
    ];
    let dead = Grid::from_rows(&rows).unwrap();
    let mut generator = RandomTileGenerator::new(11, 5);
    let random = Grid::generate((8, 8), &mut generator);

    c.bench_function("has_any_valid_move_dead_board", |b| {
        b.iter(|| black_box(&dead).has_any_valid_move())
    });
    c.bench_function("has_any_valid_move_random_board", |b| {
        b.iter(|| black_box(&random).has_any_valid_move())
    });
}

fn bench_greedy_game(c: &mut Criterion) {
    let mut seed = 0u64;

    c.bench_function("greedy_game_default_config", |b| {
        b.iter(|| {
            seed += 1;
            let mut engine = PlayEngine::seeded(GameConfig::default(), seed);
            while !engine.is_finished() {
                engine.reshuffle_if_stuck();
                match engine.hint() {
                    Some(origin) => engine.apply_move(origin).unwrap(),
                    None => break,
                };
            }
            engine.score()
        })
    });
}

criterion_group!(
    benches,
    bench_find_cluster,
    bench_has_any_valid_move,
    bench_greedy_game
);
criterion_main!(benches);
