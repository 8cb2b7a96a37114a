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
//! Enemy spawning
//!
//! The [`Director`] keeps one spawn timer per enemy kind. Each frame the
//! [`DirectorSystem`] spawns every kind whose interval has elapsed on a
//! circle around the player, at a random angle.

use crate::ecs::components::{State, Transform};
use crate::ecs::{System, World};
use crate::events::GameEvent;
use crate::geometry::Vec2;
use crate::kinds::EnemyKind;
use crate::spawn::spawn_enemy;
use rand::Rng;
use tracing::debug;

/// Per-kind spawn timers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Director {
    last_spawn: [u64; EnemyKind::COUNT],
    spawned: u64,
}

impl Director {
    /// Fresh timers, as at the start of a level
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart every timer from `frame`, the first frame of a new level
    pub fn reset(&mut self, frame: u64) {
        self.last_spawn = [frame; EnemyKind::COUNT];
        self.spawned = 0;
    }

    /// Frame `kind` last spawned on, or the level start if it has not yet
    pub fn last_spawn(&self, kind: EnemyKind) -> u64 {
        self.last_spawn[kind.index()]
    }

    /// Whether more than `interval` frames passed since `kind` last spawned
    pub fn is_due(&self, kind: EnemyKind, frame: u64, interval: u64) -> bool {
        frame.saturating_sub(self.last_spawn(kind)) > interval
    }

    /// Restart the timer for `kind`
    pub fn record_spawn(&mut self, kind: EnemyKind, frame: u64) {
        self.last_spawn[kind.index()] = frame;
        self.spawned += 1;
    }

    /// Enemies spawned since the last reset
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

/// Spawns enemies when their timers come due
pub struct DirectorSystem;

impl System for DirectorSystem {
    fn run(&mut self, world: &mut World) {
        if !world.config.director.enabled {
            return;
        }
        let frame = world.frame();
        let radius = world.config.director.spawn_radius;
        let player = world.entities.player();
        if player.get::<State>().is_dead() {
            return;
        }
        let player_id = player.id();
        let center = player.get::<Transform>().pos;

        for kind in EnemyKind::ALL {
            let interval = world.config.enemy(kind).spawn_interval;
            if !world.director.is_due(kind, frame, interval) {
                continue;
            }
            world.director.record_spawn(kind, frame);

            let angle = world.rng.gen_range(0.0f32..360.0);
            let pos = center + Vec2::from_angle(angle) * radius;
            let id = spawn_enemy(world, kind, pos, player_id);
            debug!(%id, ?kind, frame, "enemy spawned");
            world.emit(GameEvent::EnemySpawned { id, kind });
        }
    }

    fn name(&self) -> &str {
        "director"
    }
}
