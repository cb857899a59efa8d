//! Engine throughput benchmarks.
//!
//! 1. **Fresh** - build a new engine and autoplay a whole game
//! 2. **Snapshot** - clone a mid-game state and enumerate legal actions

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_tcg::{CardDefinition, Color, Engine, EngineBuilder, GameRng, PlayerId, PlayerSetup};

fn setup(name: &str) -> PlayerSetup {
    let mut main = Vec::new();
    for i in 0..13 {
        let color = if i % 2 == 0 { Color::Blue } else { Color::White };
        let card = Arc::new(CardDefinition::unit(format!("B-{i:03}"), format!("Unit {i}"), color, 1, 1, 2, 2));
        main.extend(std::iter::repeat(card).take(4));
    }
    main.truncate(50);
    let resource = Arc::new(CardDefinition::resource("R", "Resource"));
    PlayerSetup::new(name, main, vec![resource; 10])
}

fn engine(seed: u64) -> Engine {
    EngineBuilder::new(setup("A"), setup("B"))
        .seed(seed)
        .build()
        .expect("bench decks are legal")
}

fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_fresh");
    for seed in [1u64, 42] {
        group.bench_with_input(BenchmarkId::from_parameter(seed), &seed, |b, &seed| {
            b.iter(|| {
                let mut engine = engine(seed);
                black_box(engine.autoplay(20_000).expect("autoplay"))
            });
        });
    }
    group.finish();
}

fn bench_game_snapshot(c: &mut Criterion) {
    let mut engine = engine(7);
    engine.autoplay(200).expect("autoplay");
    let scripts = engine.scripts().clone();
    let player = engine.awaiting_player().unwrap_or(PlayerId::ONE);

    c.bench_function("snapshot_and_enumerate", |b| {
        b.iter(|| {
            let forked = Engine::from_state(engine.snapshot(), GameRng::new(0), scripts.clone());
            black_box(forked.get_legal_actions(player))
        });
    });
}

criterion_group!(benches, bench_game_fresh, bench_game_snapshot);
criterion_main!(benches);
