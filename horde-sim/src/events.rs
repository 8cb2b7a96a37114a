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
//! Gameplay events
//!
//! Systems push events while they run; audio, UI and animation
//! collaborators drain them after each frame instead of being called from
//! inside the simulation.

use crate::ecs::EntityId;
use crate::geometry::Vec2;
use crate::kinds::{EnemyKind, WeaponKind};
use serde::Serialize;

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum GameEvent {
    /// A new enemy was queued by the director
    EnemySpawned {
        /// The enemy
        id: EntityId,
        /// Enemy type
        kind: EnemyKind,
    },
    /// The player launched an attack
    AttackLaunched {
        /// The attack hitbox
        id: EntityId,
        /// Weapon that fired
        weapon: WeaponKind,
    },
    /// A damage exchange was accepted
    Hit {
        /// Entity on the receiving end of the reported damage
        target: EntityId,
        /// Damage dealt to the target
        amount: i32,
        /// Where the hit landed
        pos: Vec2,
    },
    /// The player took damage
    PlayerHurt {
        /// Damage taken
        amount: i32,
        /// Health left
        health: i32,
    },
    /// An enemy ran out of health
    EnemyKilled {
        /// The enemy
        id: EntityId,
        /// Enemy type
        kind: EnemyKind,
        /// Where it died
        pos: Vec2,
        /// Score credited
        score: u32,
    },
    /// The player picked up a gem
    GemCollected {
        /// Score credited
        value: u32,
    },
    /// The player reached a new level
    LevelUp {
        /// New level
        level: u32,
        /// Weapons offered for upgrade
        choices: Vec<WeaponKind>,
    },
    /// The player's health hit zero
    PlayerDied {
        /// Frame of death
        frame: u64,
    },
    /// The level was rebuilt
    Restarted,
}
