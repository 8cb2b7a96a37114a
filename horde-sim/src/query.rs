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
//! Spatial queries over entities
//!
//! Overlap is measured per axis as `(a.half + b.half) - |a.pos - b.pos|`;
//! both axes positive means the boxes intersect. Entities lacking a
//! bounding box never overlap anything.

use crate::ecs::components::{BoundingBox, State, Transform};
use crate::ecs::{Entity, EntityId, EntityManager};
use crate::geometry::Vec2;
use crate::kinds::Tag;

fn overlap_at(a: &Entity, a_pos: Vec2, b: &Entity, b_pos: Vec2) -> Vec2 {
    match (a.try_get::<BoundingBox>(), b.try_get::<BoundingBox>()) {
        (Some(a_box), Some(b_box)) => {
            let delta = (a_pos - b_pos).abs();
            a_box.half_size() + b_box.half_size() - delta
        }
        _ => Vec2::ZERO,
    }
}

/// Per-axis overlap of two entities at their current positions
pub fn overlap(a: &Entity, b: &Entity) -> Vec2 {
    overlap_at(a, a.get::<Transform>().pos, b, b.get::<Transform>().pos)
}

/// Per-axis overlap of two entities at their positions before the last step
pub fn previous_overlap(a: &Entity, b: &Entity) -> Vec2 {
    overlap_at(
        a,
        a.get::<Transform>().prev_pos,
        b,
        b.get::<Transform>().prev_pos,
    )
}

/// Whether two entities currently intersect
pub fn intersects(a: &Entity, b: &Entity) -> bool {
    let o = overlap(a, b);
    o.x > 0.0 && o.y > 0.0
}

/// Closest live, non-dead entity with `tag` within `max_distance` of `from`
///
/// Ties keep the earliest entity in tag order.
pub fn nearest(
    entities: &EntityManager,
    from: Vec2,
    tag: Tag,
    max_distance: f32,
) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    let limit = max_distance * max_distance;
    for entity in entities.tagged_entities(tag) {
        if !entity.is_active() || entity.get::<State>().is_dead() {
            continue;
        }
        let dist = from.distance_squared(entity.get::<Transform>().pos);
        if dist > limit {
            continue;
        }
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((entity.id(), dist));
        }
    }
    best.map(|(id, _)| id)
}
