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
//! Pursuit steering and attraction
//!
//! Both passes resolve their targets by id each frame. A follow target that
//! has been destroyed is dropped for good and the follower keeps its current
//! velocity.

use crate::ecs::components::{Attractor, Follow, State, StateLabel, Transform};
use crate::ecs::{EntityId, System, World};
use crate::geometry::Vec2;
use crate::kinds::Tag;
use tracing::warn;

/// Nudge `transform` towards `target` per the follow parameters
///
/// `desired = normalize(target - pos) * speed`, and the velocity moves
/// `steering_scale` of the way from its current value to `desired`.
pub fn steer(transform: &mut Transform, target: Vec2, follow: &Follow) {
    let desired = (target - transform.pos).normalize() * follow.speed;
    let steering = (desired - transform.velocity) * follow.steering_scale;
    transform.velocity += steering;
}

/// Pull `transform` towards an attractor at `center`
///
/// Inside the capture distance the target stops dead. Inside the radius it
/// moves straight at the attractor with speed `strength / distance`.
/// Returns false when the target is out of reach and nothing was applied.
pub fn attract(transform: &mut Transform, center: Vec2, attractor: &Attractor, capture_sq: f32) -> bool {
    let dist_sq = transform.pos.distance_squared(center);
    if dist_sq < capture_sq {
        transform.velocity = Vec2::ZERO;
        return true;
    }
    if dist_sq > attractor.radius * attractor.radius {
        return false;
    }
    let dist = dist_sq.sqrt();
    transform.velocity = (center - transform.pos).normalize() * (attractor.strength / dist);
    true
}

/// Steers followers towards their targets
///
/// Dead entities and entities being knocked back are left alone.
pub struct SteeringSystem;

impl System for SteeringSystem {
    fn run(&mut self, world: &mut World) {
        let mut plans: Vec<(EntityId, Vec2, Follow)> = Vec::new();
        let mut stale: Vec<EntityId> = Vec::new();

        for entity in world.entities.entities() {
            if !entity.is_active() || !entity.has::<Follow>() {
                continue;
            }
            if matches!(
                entity.get::<State>().label,
                StateLabel::Dead | StateLabel::Knockback
            ) {
                continue;
            }
            let follow = *entity.get::<Follow>();
            match world.entities.get(follow.target) {
                Some(target) if world.entities.is_live(follow.target) => {
                    plans.push((entity.id(), target.get::<Transform>().pos, follow));
                }
                _ => stale.push(entity.id()),
            }
        }

        for (id, target, follow) in plans {
            if let Some(entity) = world.entities.get_mut(id) {
                steer(entity.get_mut::<Transform>(), target, &follow);
            }
        }

        for id in stale {
            if let Some(entity) = world.entities.get_mut(id) {
                warn!(%id, target = %entity.get::<Follow>().target, "follow target gone");
                entity.remove::<Follow>();
            }
        }
    }

    fn name(&self) -> &str {
        "steering"
    }
}

/// Applies attractor pulls
///
/// Gems that no attractor reached this frame stop moving, so they rest
/// where they dropped until the player comes near.
pub struct AttractionSystem;

impl System for AttractionSystem {
    fn run(&mut self, world: &mut World) {
        let capture_sq = world.config.combat.capture_distance_sq;
        let attractors: Vec<(EntityId, Vec2, Attractor)> = world
            .entities
            .entities()
            .iter()
            .filter(|e| e.is_active() && e.has::<Attractor>() && !e.get::<State>().is_dead())
            .map(|e| (e.id(), e.get::<Transform>().pos, *e.get::<Attractor>()))
            .collect();

        for entity in world.entities.entities_mut() {
            if !entity.is_active() || entity.get::<State>().is_dead() {
                continue;
            }
            let tag = entity.tag();
            let id = entity.id();
            let transform = entity.get_mut::<Transform>();
            let mut pulled = false;
            for (source, center, attractor) in &attractors {
                if attractor.pulls != tag || *source == id {
                    continue;
                }
                pulled |= attract(transform, *center, attractor, capture_sq);
            }
            if !pulled && tag == Tag::Gem {
                transform.velocity = Vec2::ZERO;
            }
        }
    }

    fn name(&self) -> &str {
        "attraction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{EnemyKind, Kind};

    fn follower(world: &mut World, target: EntityId) -> EntityId {
        let entity = world.entities.create_entity(Kind::Enemy(EnemyKind::ChainBot));
        entity.add(Transform::new(Vec2::ZERO));
        entity.add(State::new(StateLabel::Alive));
        entity.add(Follow::new(target, 0.5, 2.0));
        entity.id()
    }

    fn anchor(world: &mut World, pos: Vec2) -> EntityId {
        let entity = world.entities.create_entity(Kind::Hero);
        entity.add(Transform::new(pos));
        entity.id()
    }

    #[test]
    fn test_steer_formula() {
        let mut transform = Transform::new(Vec2::ZERO).with_velocity(Vec2::new(0.0, 1.0));
        let follow = Follow::new(EntityId::default(), 0.5, 2.0);
        steer(&mut transform, Vec2::new(10.0, 0.0), &follow);
        // desired (2, 0); error (2, -1); half of it applied
        assert_eq!(transform.velocity, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_attract_regions() {
        let attractor = Attractor {
            strength: 100.0,
            radius: 50.0,
            pulls: Tag::Gem,
        };

        let mut far = Transform::new(Vec2::new(100.0, 0.0)).with_velocity(Vec2::new(1.0, 1.0));
        assert!(!attract(&mut far, Vec2::ZERO, &attractor, 4.0));
        assert_eq!(far.velocity, Vec2::new(1.0, 1.0));

        let mut near = Transform::new(Vec2::new(20.0, 0.0));
        assert!(attract(&mut near, Vec2::ZERO, &attractor, 4.0));
        assert_eq!(near.velocity, Vec2::new(-5.0, 0.0));

        let mut captured = Transform::new(Vec2::new(1.0, 0.0)).with_velocity(Vec2::new(3.0, 0.0));
        assert!(attract(&mut captured, Vec2::ZERO, &attractor, 4.0));
        assert_eq!(captured.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_steering_moves_towards_target() {
        let mut world = World::default();
        let target = anchor(&mut world, Vec2::new(0.0, 10.0));
        let id = follower(&mut world, target);
        world.entities.flush();

        SteeringSystem.run(&mut world);
        let velocity = world.entities.get(id).unwrap().get::<Transform>().velocity;
        assert_eq!(velocity, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_knocked_back_entities_do_not_steer() {
        let mut world = World::default();
        let target = anchor(&mut world, Vec2::new(0.0, 10.0));
        let id = follower(&mut world, target);
        world.entities.get_mut(id).unwrap().get_mut::<State>().label = StateLabel::Knockback;
        world.entities.flush();

        SteeringSystem.run(&mut world);
        assert_eq!(
            world.entities.get(id).unwrap().get::<Transform>().velocity,
            Vec2::ZERO
        );
    }

    #[test]
    fn test_destroyed_target_drops_follow() {
        let mut world = World::default();
        let target = anchor(&mut world, Vec2::new(0.0, 10.0));
        let id = follower(&mut world, target);
        world.entities.flush();
        world.entities.destroy(target);

        SteeringSystem.run(&mut world);
        let entity = world.entities.get(id).unwrap();
        assert!(!entity.has::<Follow>());
        assert_eq!(entity.get::<Transform>().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_unreached_gems_stop() {
        let mut world = World::default();
        let gem = world.entities.create_entity(Kind::ScoreGem);
        gem.add(Transform::new(Vec2::new(500.0, 0.0)).with_velocity(Vec2::new(2.0, 0.0)));
        let gem = gem.id();
        let player = anchor(&mut world, Vec2::ZERO);
        world.entities.get_mut(player).unwrap().add(Attractor {
            strength: 10.0,
            radius: 50.0,
            pulls: Tag::Gem,
        });
        world.entities.flush();

        AttractionSystem.run(&mut world);
        assert_eq!(
            world.entities.get(gem).unwrap().get::<Transform>().velocity,
            Vec2::ZERO
        );
    }

    #[test]
    fn test_destroyed_attractor_stops_pulling() {
        let mut world = World::default();
        let gem = world.entities.create_entity(Kind::ScoreGem);
        gem.add(Transform::new(Vec2::new(20.0, 0.0)));
        let gem = gem.id();
        let player = anchor(&mut world, Vec2::ZERO);
        world.entities.get_mut(player).unwrap().add(Attractor {
            strength: 100.0,
            radius: 50.0,
            pulls: Tag::Gem,
        });
        world.entities.flush();

        AttractionSystem.run(&mut world);
        assert_eq!(
            world.entities.get(gem).unwrap().get::<Transform>().velocity,
            Vec2::new(-5.0, 0.0)
        );

        world.entities.destroy(player);
        AttractionSystem.run(&mut world);
        assert_eq!(
            world.entities.get(gem).unwrap().get::<Transform>().velocity,
            Vec2::ZERO
        );
    }

    #[test]
    fn test_enemies_outside_vortex_keep_velocity() {
        let mut world = World::default();
        let target = anchor(&mut world, Vec2::ZERO);
        let id = follower(&mut world, target);
        world
            .entities
            .get_mut(id)
            .unwrap()
            .get_mut::<Transform>()
            .velocity = Vec2::new(1.0, 0.0);
        world.entities.flush();

        AttractionSystem.run(&mut world);
        assert_eq!(
            world.entities.get(id).unwrap().get::<Transform>().velocity,
            Vec2::new(1.0, 0.0)
        );
    }
}
