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
//! Knockback application and decay
//!
//! A hit pushes the receiver away from the dealer at
//! `magnitude / scale` and decelerates it by `decel * scale` per frame, so
//! bigger bodies move less and stop sooner. The push ends exactly
//! `duration` frames after it was applied.

use crate::ecs::components::{Health, Knockback, KnockbackSpec, State, StateLabel, Transform};
use crate::ecs::{Entity, System, World};
use crate::geometry::Vec2;
use crate::kinds::Tag;
use tracing::trace;

/// Start (or restart) a push on `receiver` away from `from`
///
/// A spec with zero duration pushes for zero frames and leaves the receiver
/// untouched.
pub fn apply_knockback(receiver: &mut Entity, from: Vec2, spec: KnockbackSpec, decel: f32) {
    if spec.duration == 0 {
        return;
    }
    let transform = receiver.get_mut::<Transform>();
    let scale = if transform.scale > 0.0 { transform.scale } else { 1.0 };
    let dir = (transform.pos - from).normalize();
    transform.velocity = dir * spec.magnitude / scale;
    transform.accel = -decel * scale;

    receiver.add(Knockback::start(spec.magnitude, spec.duration));
    if receiver.tag() == Tag::Enemy && !receiver.get::<State>().is_dead() {
        receiver.get_mut::<State>().label = StateLabel::Knockback;
    }
}

/// End a push: stop the entity and restore its normal state
fn expire(entity: &mut Entity) {
    let transform = entity.get_mut::<Transform>();
    transform.velocity = Vec2::ZERO;
    transform.accel = 0.0;
    entity.remove::<Knockback>();

    if !entity.has::<State>() {
        return;
    }
    let depleted = entity.get::<Health>().is_depleted();
    let label = match (entity.tag(), depleted) {
        (_, true) => StateLabel::Dead,
        (Tag::Player, false) => StateLabel::Idle,
        (_, false) => StateLabel::Alive,
    };
    entity.get_mut::<State>().label = label;
}

/// Counts active pushes down and ends them
pub struct KnockbackSystem;

impl System for KnockbackSystem {
    fn run(&mut self, world: &mut World) {
        for entity in world.entities.entities_mut() {
            if !entity.is_active() || !entity.has::<Knockback>() {
                continue;
            }
            let knockback = entity.get_mut::<Knockback>();
            if !knockback.active {
                continue;
            }
            knockback.remaining = knockback.remaining.saturating_sub(1);
            if knockback.remaining == 0 {
                trace!(id = %entity.id(), "knockback ended");
                expire(entity);
            }
        }
    }

    fn name(&self) -> &str {
        "knockback"
    }
}
