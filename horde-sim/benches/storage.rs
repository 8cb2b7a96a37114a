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
//! Benchmarks for the entity store
//!
//! These benchmarks measure:
//! - Queuing and flushing batches of spawns
//! - Reaping after mass destruction
//! - Tag lookups and id-based access

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use horde_sim::ecs::components::{BoundingBox, Transform};
use horde_sim::ecs::{EntityId, EntityManager};
use horde_sim::geometry::Vec2;
use horde_sim::kinds::{Kind, Tag};

fn populate(manager: &mut EntityManager, count: usize) -> Vec<EntityId> {
    (0..count)
        .map(|i| {
            let gem = manager.create_entity(Kind::ScoreGem);
            gem.add(Transform::new(Vec2::new(i as f32, (i * 2) as f32)));
            gem.add(BoundingBox::new(Vec2::new(12.0, 12.0)));
            gem.id()
        })
        .collect()
}

/// Benchmark: queue N entities and flush them into the live set
fn bench_spawn_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_flush");

    for entity_count in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(entity_count),
            entity_count,
            |b, &count| {
                b.iter(|| {
                    let mut manager = EntityManager::new();
                    populate(&mut manager, count);
                    manager.flush();
                    black_box(manager);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: destroy every other entity and reap
fn bench_reap(c: &mut Criterion) {
    let mut group = c.benchmark_group("reap_half");

    for entity_count in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(entity_count),
            entity_count,
            |b, &count| {
                b.iter_batched(
                    || {
                        let mut manager = EntityManager::new();
                        let ids = populate(&mut manager, count);
                        manager.flush();
                        (manager, ids)
                    },
                    |(mut manager, ids)| {
                        for id in ids.iter().step_by(2) {
                            manager.destroy(*id);
                        }
                        manager.flush();
                        black_box(manager);
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark: sum positions through the tag list versus by id
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for entity_count in [100, 1000, 10000].iter() {
        let mut manager = EntityManager::new();
        let ids = populate(&mut manager, *entity_count);
        manager.flush();
        group.throughput(Throughput::Elements(*entity_count as u64));

        group.bench_with_input(BenchmarkId::new("tagged", entity_count), &manager, |b, manager| {
            b.iter(|| {
                let sum = manager
                    .tagged_entities(Tag::Gem)
                    .fold(Vec2::ZERO, |acc, e| acc + e.get::<Transform>().pos);
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("by_id", entity_count), &ids, |b, ids| {
            b.iter(|| {
                let sum = ids
                    .iter()
                    .filter_map(|id| manager.get(*id))
                    .fold(Vec2::ZERO, |acc, e| acc + e.get::<Transform>().pos);
                black_box(sum);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_spawn_flush, bench_reap, bench_lookup);
criterion_main!(benches);
