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
//! Entity factories
//!
//! Every entity the simulation creates is assembled here from the config
//! tables. Factories only queue entities; they show up in the live views
//! after the next flush.

use crate::config::WeaponStats;
use crate::ecs::components::{
    Arsenal, Attractor, BoundingBox, DamageText, Damage, Follow, Health, Input, KnockbackSpec,
    Lifespan, MoveWithVelocityOf, Score, State, StateLabel, Transform, Weapon,
};
use crate::ecs::{EntityId, World};
use crate::geometry::Vec2;
use crate::kinds::{EnemyKind, Kind, Tag, WeaponKind};
use tracing::debug;

/// Queue the player at the configured spawn point with its starting weapons
pub fn spawn_player(world: &mut World) -> EntityId {
    let cfg = world.config.player.clone();
    let arsenal = Arsenal {
        weapons: cfg
            .weapons
            .iter()
            .map(|&kind| Weapon::new(kind, world.config.weapon(kind).clone()))
            .collect(),
    };
    let first_threshold = world.config.scoring.first_threshold;

    let player = world.entities.create_entity(Kind::Hero);
    player.add(Transform::new(cfg.spawn));
    player.add(BoundingBox::new(cfg.size));
    player.add(Health::new(cfg.health, cfg.invulnerability));
    player.add(Damage::new(cfg.damage));
    if cfg.knockback.magnitude > 0.0 {
        player.add(cfg.knockback);
    }
    player.add(Input::default());
    player.add(State::new(StateLabel::Idle));
    player.add(Score::progression(first_threshold));
    player.add(Attractor {
        strength: cfg.magnet_strength,
        radius: cfg.magnet_radius,
        pulls: Tag::Gem,
    });
    player.add(arsenal);

    let id = player.id();
    debug!(%id, "player spawned");
    id
}

/// Queue an enemy at `pos` that pursues `target`
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, pos: Vec2, target: EntityId) -> EntityId {
    let cfg = world.config.enemy(kind).clone();

    let enemy = world.entities.create_entity(Kind::Enemy(kind));
    enemy.add(Transform::new(pos).with_scale(cfg.scale));
    enemy.add(BoundingBox::new(cfg.size * cfg.scale));
    enemy.add(Health::new(cfg.health, cfg.invulnerability));
    enemy.add(Damage::new(cfg.damage));
    enemy.add(State::new(StateLabel::Alive));
    enemy.add(Score::worth(cfg.score));
    enemy.add(Follow::new(target, cfg.steering, cfg.speed));
    if let Some(spec) = cfg.knockback {
        enemy.add(spec);
    }
    enemy.id()
}

/// Queue an experience gem at `pos`
pub fn spawn_gem(world: &mut World, pos: Vec2) -> EntityId {
    let cfg = world.config.gem.clone();

    let gem = world.entities.create_entity(Kind::ScoreGem);
    gem.add(Transform::new(pos));
    gem.add(BoundingBox::new(cfg.size));
    gem.add(Score::worth(cfg.value));
    gem.id()
}

/// Queue a floating damage number rising from `pos`
pub fn spawn_damage_text(world: &mut World, pos: Vec2, amount: i32) -> EntityId {
    let frame = world.frame();
    let frames = world.config.combat.damage_text_frames;
    let rise = world.config.combat.damage_text_rise;

    let text = world.entities.create_entity(Kind::DamageNumber);
    text.add(Transform::new(pos).with_velocity(Vec2::new(0.0, -rise)));
    text.add(Lifespan::new(frames, frame));
    text.add(DamageText { amount });
    text.id()
}

/// Queue the hitbox of one weapon shot
///
/// `origin` is the shooter's position and `target` the aim point. Melee
/// kinds ride along with `owner`; placed kinds appear at `target`;
/// projectiles fly from `origin` along the aim direction.
pub fn spawn_attack(
    world: &mut World,
    owner: EntityId,
    origin: Vec2,
    kind: WeaponKind,
    stats: &WeaponStats,
    target: Vec2,
) -> EntityId {
    let frame = world.frame();
    let mut dir = (target - origin).normalize();
    if dir == Vec2::ZERO {
        dir = Vec2::new(1.0, 0.0);
    }

    let pos = if kind.placed_at_target() {
        target
    } else {
        origin + dir * stats.reach
    };

    // Slashes are wide, flat arcs
    let base = match kind {
        WeaponKind::Slash | WeaponKind::RangedSlash => Vec2::new(stats.size.x, stats.size.y / 2.0),
        _ => stats.size,
    };

    let mut transform = Transform::new(pos)
        .with_angle(dir.angle_degrees())
        .with_scale(stats.scale);
    if kind.is_projectile() {
        transform = transform.with_velocity(dir * stats.speed).with_accel(stats.decel);
    }

    let attack = world.entities.create_entity(Kind::Attack(kind));
    attack.add(transform);
    attack.add(BoundingBox::new(base * stats.scale));
    attack.add(Lifespan::new(stats.duration, frame));
    attack.add(Health::new(stats.pierce, 0));
    attack.add(Damage::new(stats.damage));
    if stats.knockback.magnitude > 0.0 {
        attack.add(KnockbackSpec::new(stats.knockback.magnitude, stats.knockback.duration));
    }
    if kind.follows_player() {
        attack.add(MoveWithVelocityOf::new(owner));
    }
    if kind == WeaponKind::Whirlpool {
        attack.add(Attractor {
            strength: stats.attract_strength,
            radius: stats.attract_radius,
            pulls: Tag::Enemy,
        });
    }
    attack.id()
}
