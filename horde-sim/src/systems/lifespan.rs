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
//! Lifespan expiry

use crate::ecs::components::Lifespan;
use crate::ecs::{System, World};
use tracing::trace;

/// Destroys entities whose lifespan has run out
///
/// An entity created on frame `c` with duration `d` is destroyed on the
/// first frame `f` with `f - c > d`, and reaped at the following flush.
pub struct LifespanSystem;

impl System for LifespanSystem {
    fn run(&mut self, world: &mut World) {
        let frame = world.frame();
        let mut expired = 0usize;
        for entity in world.entities.entities_mut() {
            if !entity.is_active() {
                continue;
            }
            if entity
                .try_get::<Lifespan>()
                .map_or(false, |life| life.is_expired(frame))
            {
                entity.destroy();
                expired += 1;
            }
        }
        if expired > 0 {
            trace!(frame, expired, "lifespans expired");
        }
    }

    fn name(&self) -> &str {
        "lifespan"
    }
}
