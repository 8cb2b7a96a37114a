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
//! Velocity assembly and position integration
//!
//! Runs in three passes: the player's velocity is rebuilt from input,
//! velocity links copy their target's velocity, then every transform gets
//! its speed adjusted by `accel` and its position advanced by one step.

use crate::ecs::components::{Input, Knockback, MoveWithVelocityOf, State, StateLabel, Transform};
use crate::ecs::{EntityId, System, World};
use crate::geometry::Vec2;
use tracing::warn;

/// Apply the per-frame speed change along the current heading
///
/// Speed is clamped at zero so deceleration never flips the direction.
pub fn apply_accel(transform: &mut Transform) {
    if transform.accel == 0.0 {
        return;
    }
    let speed = (transform.velocity.length() + transform.accel).max(0.0);
    transform.velocity = transform.velocity.normalize() * speed;
}

/// Advance one step: `prev_pos = pos; pos += velocity`
pub fn integrate(transform: &mut Transform) {
    transform.prev_pos = transform.pos;
    transform.pos += transform.velocity;
}

/// Moves everything that has a transform
pub struct MovementSystem;

impl MovementSystem {
    fn steer_player(world: &mut World) {
        let speed = world.config.player.speed;
        let player = world.entities.player_mut();
        let state = player.get::<State>().label;
        if state == StateLabel::Dead {
            player.get_mut::<Transform>().velocity = Vec2::ZERO;
            return;
        }
        if player.get::<Knockback>().active {
            return;
        }
        let velocity = player.get::<Input>().direction().normalize() * speed;
        player.get_mut::<Transform>().velocity = velocity;
        player.get_mut::<State>().label = if velocity == Vec2::ZERO {
            StateLabel::Idle
        } else {
            StateLabel::Running
        };
    }

    fn copy_linked_velocities(world: &mut World) {
        let links: Vec<(EntityId, Option<Vec2>)> = world
            .entities
            .entities()
            .iter()
            .filter(|e| e.is_active() && e.has::<MoveWithVelocityOf>())
            .map(|e| {
                let target = e.get::<MoveWithVelocityOf>().target;
                let velocity = world
                    .entities
                    .get(target)
                    .filter(|_| world.entities.is_live(target))
                    .map(|t| t.get::<Transform>().velocity);
                (e.id(), velocity)
            })
            .collect();

        for (id, velocity) in links {
            let Some(entity) = world.entities.get_mut(id) else {
                continue;
            };
            match velocity {
                Some(velocity) => entity.get_mut::<Transform>().velocity = velocity,
                None => {
                    warn!(%id, "velocity link target gone");
                    entity.remove::<MoveWithVelocityOf>();
                }
            }
        }
    }
}

impl System for MovementSystem {
    fn run(&mut self, world: &mut World) {
        Self::steer_player(world);
        Self::copy_linked_velocities(world);

        for entity in world.entities.entities_mut() {
            if !entity.is_active() || !entity.has::<Transform>() {
                continue;
            }
            let transform = entity.get_mut::<Transform>();
            apply_accel(transform);
            integrate(transform);
        }
    }

    fn name(&self) -> &str {
        "movement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{EnemyKind, Kind, WeaponKind};
    use crate::spawn::spawn_player;

    fn setup() -> (World, EntityId) {
        let mut world = World::default();
        let player = spawn_player(&mut world);
        world.entities.flush();
        (world, player)
    }

    #[test]
    fn test_accel_is_clamped() {
        let mut transform = Transform::new(Vec2::ZERO)
            .with_velocity(Vec2::new(0.1, 0.0))
            .with_accel(-0.5);
        apply_accel(&mut transform);
        assert_eq!(transform.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_accel_keeps_heading() {
        let mut transform = Transform::new(Vec2::ZERO)
            .with_velocity(Vec2::new(3.0, 4.0))
            .with_accel(-1.0);
        apply_accel(&mut transform);
        assert!((transform.velocity.length() - 4.0).abs() < 1e-5);
        assert!((transform.velocity.x - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_integrate_records_previous_position() {
        let mut transform = Transform::new(Vec2::new(1.0, 1.0)).with_velocity(Vec2::new(2.0, -1.0));
        integrate(&mut transform);
        assert_eq!(transform.prev_pos, Vec2::new(1.0, 1.0));
        assert_eq!(transform.pos, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let (mut world, _) = setup();
        {
            let input = world.entities.player_mut().get_mut::<Input>();
            input.right = true;
            input.down = true;
        }
        MovementSystem.run(&mut world);

        let player = world.entities.player();
        let velocity = player.get::<Transform>().velocity;
        assert!((velocity.length() - 3.0).abs() < 1e-5);
        assert_eq!(player.get::<State>().label, StateLabel::Running);
    }

    #[test]
    fn test_no_input_is_idle() {
        let (mut world, _) = setup();
        MovementSystem.run(&mut world);
        let player = world.entities.player();
        assert_eq!(player.get::<Transform>().velocity, Vec2::ZERO);
        assert_eq!(player.get::<State>().label, StateLabel::Idle);
    }

    #[test]
    fn test_linked_velocity_copies_player() {
        let (mut world, player) = setup();
        let slash = world.entities.create_entity(Kind::Attack(WeaponKind::Slash));
        slash.add(Transform::new(Vec2::ZERO));
        slash.add(MoveWithVelocityOf::new(player));
        let slash = slash.id();
        world.entities.flush();
        world.entities.player_mut().get_mut::<Input>().left = true;

        MovementSystem.run(&mut world);
        let transform = world.entities.get(slash).unwrap().get::<Transform>();
        assert_eq!(transform.velocity, Vec2::new(-3.0, 0.0));
        assert_eq!(transform.pos, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_dangling_link_is_dropped() {
        let (mut world, _) = setup();
        let slash = world.entities.create_entity(Kind::Attack(WeaponKind::Slash));
        slash.add(Transform::new(Vec2::ZERO).with_velocity(Vec2::new(1.0, 0.0)));
        slash.add(MoveWithVelocityOf::new(EntityId::new(9999)));
        let slash = slash.id();
        world.entities.flush();

        MovementSystem.run(&mut world);
        let entity = world.entities.get(slash).unwrap();
        assert!(!entity.has::<MoveWithVelocityOf>());
        assert_eq!(entity.get::<Transform>().pos, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_link_to_destroyed_entity_is_dropped() {
        let (mut world, _) = setup();
        let carrier = world.entities.create_entity(Kind::Enemy(EnemyKind::ChainBot));
        carrier.add(Transform::new(Vec2::ZERO).with_velocity(Vec2::new(5.0, 0.0)));
        let carrier = carrier.id();
        let slash = world.entities.create_entity(Kind::Attack(WeaponKind::Slash));
        slash.add(Transform::new(Vec2::ZERO).with_velocity(Vec2::new(0.0, 1.0)));
        slash.add(MoveWithVelocityOf::new(carrier));
        let slash = slash.id();
        world.entities.flush();
        world.entities.destroy(carrier);

        MovementSystem.run(&mut world);
        let entity = world.entities.get(slash).unwrap();
        assert!(!entity.has::<MoveWithVelocityOf>());
        assert_eq!(entity.get::<Transform>().velocity, Vec2::new(0.0, 1.0));
        assert_eq!(entity.get::<Transform>().pos, Vec2::new(0.0, 1.0));
    }
}
