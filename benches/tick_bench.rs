use std::hint::black_box;

use agar_arena::bots::{AggressiveShyBot, HungryBot, HungryShyBot};
use agar_arena::consts::SIM_DT;
use agar_arena::{Engine, EngineConfig};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

const STEPS: usize = 64;

fn populated_engine(bots: usize) -> Engine {
    let config = EngineConfig {
        seed: 0xBEEF,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config).expect("valid bench config");
    for i in 0..bots {
        let name = format!("bot{i}");
        match i % 3 {
            0 => engine.add_player::<HungryBot>(name),
            1 => engine.add_player::<HungryShyBot>(name),
            _ => engine.add_player::<AggressiveShyBot>(name),
        };
    }
    engine
}

fn bench_engine_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tick");
    for bots in [4_usize, 16, 64] {
        group.bench_function(format!("steps{STEPS}_bots{bots}"), |b| {
            b.iter_batched(
                || populated_engine(bots),
                |mut engine| {
                    for _ in 0..STEPS {
                        engine.tick(SIM_DT);
                    }
                    black_box(engine.ticks())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_ticks);
criterion_main!(benches);
