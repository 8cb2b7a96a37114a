// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for whole-frame simulation cost
//!
//! A game is warmed up until the director has populated the arena, then
//! single frames are timed with auto-attack on.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use horde_sim::geometry::Vec2;
use horde_sim::kinds::EnemyKind;
use horde_sim::spawn::spawn_enemy;
use horde_sim::{Game, GameConfig};

fn warmed_game(enemies: usize) -> Game {
    let mut config = GameConfig::default();
    config.director.enabled = false;
    config.restart_on_death = false;
    config.player.health = i32::MAX;
    let mut game = Game::new(config).unwrap();
    game.input_mut().auto_attack = true;

    let player = game.player().id();
    let center = game.world().config.player.spawn;
    for i in 0..enemies {
        let angle = i as f32 * 360.0 / enemies as f32;
        let pos = center + Vec2::from_angle(angle) * (200.0 + (i % 7) as f32 * 40.0);
        let kind = EnemyKind::ALL[i % EnemyKind::COUNT];
        spawn_enemy(game.world_mut(), kind, pos, player);
    }
    game.advance_frame();
    game
}

/// Benchmark: one frame with N enemies converging on the player
fn bench_advance_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_frame");

    for enemy_count in [50, 200, 800].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(enemy_count),
            enemy_count,
            |b, &count| {
                let mut game = warmed_game(count);
                b.iter(|| {
                    game.advance_frame();
                    black_box(game.frame());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: a full minute of play with the director running
fn bench_minute_of_play(c: &mut Criterion) {
    c.bench_function("minute_of_play", |b| {
        b.iter(|| {
            let mut game = Game::new(GameConfig::default()).unwrap();
            game.input_mut().auto_attack = true;
            for _ in 0..3600 {
                game.advance_frame();
            }
            black_box(game.snapshot());
        });
    });
}

/// Benchmark: capture and serialize a crowded frame
fn bench_snapshot(c: &mut Criterion) {
    let game = warmed_game(800);
    c.bench_function("snapshot_json", |b| {
        b.iter(|| black_box(game.snapshot().to_json().unwrap()));
    });
}

criterion_group!(benches, bench_advance_frame, bench_minute_of_play, bench_snapshot);
criterion_main!(benches);
