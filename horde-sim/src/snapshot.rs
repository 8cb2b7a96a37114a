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
//! Frame snapshots for render and UI collaborators
//!
//! A [`FrameSnapshot`] is a plain, serializable copy of what a renderer or
//! HUD needs after a frame: where everything is, what state it is in, and
//! the player's progression.

use crate::ecs::components::{
    BoundingBox, DamageText, Health, Lifespan, Score, State, StateLabel, Transform,
};
use crate::ecs::{EntityId, EntityManager};
use crate::error::SimResult;
use crate::geometry::Vec2;
use crate::kinds::{Kind, Tag};
use serde::Serialize;

/// Player stats shown on the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    /// Current health
    pub health: i32,
    /// Maximum health
    pub max_health: i32,
    /// Health bar fill in `[0, 1]`
    pub health_ratio: f32,
    /// Score collected
    pub score: u32,
    /// Current level
    pub level: u32,
    /// Progress towards the next level in `[0, 1]`
    pub progress: f32,
}

/// One entity as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    /// Entity id
    pub id: EntityId,
    /// Category
    pub tag: Tag,
    /// Subtype
    pub kind: Kind,
    /// Position
    pub pos: Vec2,
    /// Rotation in degrees
    pub angle: f32,
    /// Uniform scale
    pub scale: f32,
    /// Behavior state, if the entity has one
    pub state: Option<StateLabel>,
    /// Remaining health, if the entity has any
    pub health: Option<i32>,
    /// Hitbox half size, if the entity has one
    pub half_size: Option<Vec2>,
    /// Damage number text, if any
    pub text: Option<String>,
    /// Fade progress for short-lived entities in `[0, 1]`
    pub fade: Option<f32>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Frame the snapshot was taken after
    pub frame: u64,
    /// Player HUD values
    pub hud: HudSnapshot,
    /// Live entities in insertion order
    pub entities: Vec<EntitySnapshot>,
}

impl FrameSnapshot {
    /// Capture the live entities of `manager`
    ///
    /// # Panics
    ///
    /// Panics unless exactly one live entity is tagged as the player.
    pub fn capture(manager: &EntityManager, frame: u64) -> Self {
        let player = manager.player();
        let health = player.get::<Health>();
        let score = player.get::<Score>();
        let hud = HudSnapshot {
            health: health.current,
            max_health: health.max,
            health_ratio: health.ratio(),
            score: score.value,
            level: score.level,
            progress: score.progress(),
        };

        let entities = manager
            .entities()
            .iter()
            .filter(|e| e.is_active())
            .map(|e| {
                let transform = e.get::<Transform>();
                EntitySnapshot {
                    id: e.id(),
                    tag: e.tag(),
                    kind: e.kind(),
                    pos: transform.pos,
                    angle: transform.angle,
                    scale: transform.scale,
                    state: e.try_get::<State>().map(|s| s.label),
                    health: e.try_get::<Health>().map(|h| h.current),
                    half_size: e.try_get::<BoundingBox>().map(BoundingBox::half_size),
                    text: e.try_get::<DamageText>().map(|t| t.amount.to_string()),
                    fade: e.try_get::<Lifespan>().map(|l| l.progress(frame)),
                }
            })
            .collect();

        FrameSnapshot {
            frame,
            hud,
            entities,
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
