//! Benchmarks for board generation and the turn engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use trap_race::{
    compute::{Color, Game, GameRng, Specimen, TurnRules, generate_board, player_for, take_turn},
    schema::GameConfig,
};

fn palette(config: &GameConfig) -> Vec<Color> {
    (0..config.number_of_colors() as Color).collect()
}

fn bench_generate_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_board");

    for width in [25, 50, 100] {
        let mut config = GameConfig::default();
        config.board.width = width;
        config.board.finish_column = width - 1;
        let colors = palette(&config);

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            let mut rng = GameRng::new(7);
            b.iter(|| generate_board(black_box(&mut rng), &colors, &config.board));
        });
    }

    group.finish();
}

fn bench_take_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("take_turn");

    for population in [15, 150, 1500] {
        let config = GameConfig::default();
        let colors = palette(&config);
        let player = player_for(config.player, config.genome.length);
        let rules = TurnRules {
            lifespan: config.population.lifespan,
            finish_bonus: config.board.finish_bonus,
            vision_width: config.vision_width,
        };

        let mut rng = GameRng::new(11);
        let Ok((template, _)) = generate_board(&mut rng, &colors, &config.board) else {
            continue;
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, &population| {
                b.iter_batched(
                    || {
                        let mut board = template.clone();
                        let mut rng = GameRng::new(3);
                        for _ in 0..population {
                            if let Some(start) = board.random_start(&mut rng) {
                                let genome = rng.genome(config.genome.length);
                                board.add_specimen(Specimen::new(genome, 0), start);
                            }
                        }
                        board.advance_turn();
                        (board, rng)
                    },
                    |(mut board, mut rng)| {
                        take_turn(&mut board, 1, player.as_ref(), &rules, &mut rng)
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_full_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_board");
    group.sample_size(10);

    group.bench_function("default_1000_turns", |b| {
        b.iter(|| {
            let mut config = GameConfig::default();
            config.turns = 1000;
            let player = player_for(config.player, config.genome.length);
            Game::new(config, player).and_then(|mut game| game.run())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_generate_board, bench_take_turn, bench_full_board);
criterion_main!(benches);
