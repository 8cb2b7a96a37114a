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
//! Damage exchange and death handling

use crate::ecs::components::{
    BoundingBox, Damage, Follow, Health, Knockback, KnockbackSpec, Lifespan, Score, State,
    StateLabel, Transform,
};
use crate::ecs::{Entity, EntityId, World};
use crate::events::GameEvent;
use crate::geometry::Vec2;
use crate::spawn::spawn_gem;
use crate::systems::knockback::apply_knockback;
use rand::Rng;
use tracing::{debug, info};

/// Damage dealt by an accepted exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// Damage taken by the first entity
    pub to_a: i32,
    /// Damage taken by the second entity
    pub to_b: i32,
}

/// Trade damage between two touching entities
///
/// The exchange is refused outright (no damage, no knockback) if either
/// side is still inside its invulnerability window. Otherwise each side
/// loses the other's damage, both windows restart at `frame`, and a side
/// carrying a [`KnockbackSpec`] pushes the other away.
pub fn exchange_damage(a: &mut Entity, b: &mut Entity, frame: u64, decel: f32) -> Option<Exchange> {
    if !a.get::<Health>().can_be_hit(frame) || !b.get::<Health>().can_be_hit(frame) {
        return None;
    }

    let exchange = Exchange {
        to_a: b.get::<Damage>().amount,
        to_b: a.get::<Damage>().amount,
    };
    for (entity, amount) in [(&mut *a, exchange.to_a), (&mut *b, exchange.to_b)] {
        let health = entity.get_mut::<Health>();
        health.current -= amount;
        health.last_damage_frame = Some(frame);
    }

    let a_pos = a.get::<Transform>().pos;
    let b_pos = b.get::<Transform>().pos;
    if let Some(spec) = b.try_get::<KnockbackSpec>().copied() {
        apply_knockback(a, b_pos, spec, decel);
    }
    if let Some(spec) = a.try_get::<KnockbackSpec>().copied() {
        apply_knockback(b, a_pos, spec, decel);
    }
    Some(exchange)
}

/// Turn an enemy into a corpse and pay out its score
///
/// The corpse loses its pursuit and hitbox, stops moving, and lingers for
/// the death animation before its lifespan reaps it. It scatters one gem per
/// point of score around where it fell.
pub fn kill_enemy(world: &mut World, id: EntityId) {
    let frame = world.frame();
    let corpse_frames = world.config.combat.corpse_frames;
    let scatter = world.config.gem.scatter;

    let Some(enemy) = world.entities.get_mut(id) else {
        return;
    };
    if enemy.get::<State>().is_dead() {
        return;
    }
    enemy.get_mut::<State>().label = StateLabel::Dead;
    enemy.remove::<Follow>();
    enemy.remove::<BoundingBox>();
    enemy.remove::<Knockback>();
    let transform = enemy.get_mut::<Transform>();
    transform.velocity = Vec2::ZERO;
    transform.accel = 0.0;
    let pos = transform.pos;
    enemy.add(Lifespan::new(corpse_frames, frame));
    let score = enemy.get::<Score>().value;
    let kind = enemy.kind().enemy();

    world.entities.player_mut().get_mut::<Score>().value += score;

    for _ in 0..score {
        let angle = world.rng.gen_range(0.0f32..360.0);
        spawn_gem(world, pos + Vec2::from_angle(angle) * scatter);
    }

    debug!(%id, score, frame, "enemy killed");
    if let Some(kind) = kind {
        world.emit(GameEvent::EnemyKilled {
            id,
            kind,
            pos,
            score,
        });
    }
}

/// Mark the player dead, once
pub fn kill_player(world: &mut World) {
    let frame = world.frame();
    let player = world.entities.player_mut();
    if player.get::<State>().is_dead() {
        return;
    }
    player.get_mut::<State>().label = StateLabel::Dead;
    player.get_mut::<Transform>().velocity = Vec2::ZERO;
    info!(frame, "player died");
    world.emit(GameEvent::PlayerDied { frame });
}
