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
//! Collision detection and resolution
//!
//! Each live enemy is tested against the player, then against every player
//! attack, then against every other enemy. Contacts with the player and
//! with attacks resolve through damage only; enemies push each other apart.
//! Finally gems touching the player are collected.

use crate::ecs::components::{Health, Score, State, Transform};
use crate::ecs::{EntityId, System, World};
use crate::events::GameEvent;
use crate::kinds::Tag;
use crate::query::{intersects, overlap, previous_overlap};
use crate::spawn::spawn_damage_text;
use crate::systems::combat::{exchange_damage, kill_enemy, kill_player};
use tracing::trace;

/// Resolves overlaps between enemies, the player, attacks and gems
pub struct CollisionSystem;

impl CollisionSystem {
    fn is_fighting(world: &World, id: EntityId) -> bool {
        world
            .entities
            .get(id)
            .map_or(false, |e| e.is_active() && !e.get::<State>().is_dead())
    }

    fn enemy_vs_player(world: &mut World, enemy: EntityId, player: EntityId) {
        let frame = world.frame();
        let decel = world.config.combat.knockback_decel;
        let Some((e, p)) = world.entities.get_pair_mut(enemy, player) else {
            return;
        };
        if !intersects(e, p) {
            return;
        }
        let Some(exchange) = exchange_damage(e, p, frame, decel) else {
            return;
        };
        let enemy_down = e.get::<Health>().is_depleted();
        let health = p.get::<Health>().current;

        trace!(%enemy, taken = exchange.to_b, health, "player hit");
        world.emit(GameEvent::PlayerHurt {
            amount: exchange.to_b,
            health,
        });
        if enemy_down {
            kill_enemy(world, enemy);
        }
        if health <= 0 {
            kill_player(world);
        }
    }

    fn enemy_vs_attack(world: &mut World, enemy: EntityId, attack: EntityId) {
        if !world.entities.is_live(attack) {
            return;
        }
        let frame = world.frame();
        let decel = world.config.combat.knockback_decel;
        let Some((e, a)) = world.entities.get_pair_mut(enemy, attack) else {
            return;
        };
        if !intersects(e, a) {
            return;
        }
        let Some(exchange) = exchange_damage(e, a, frame, decel) else {
            return;
        };
        let pos = e.get::<Transform>().pos;
        let enemy_down = e.get::<Health>().is_depleted();
        let attack_spent = a.get::<Health>().is_depleted();
        if attack_spent {
            a.destroy();
        }

        spawn_damage_text(world, pos, exchange.to_a);
        world.emit(GameEvent::Hit {
            target: enemy,
            amount: exchange.to_a,
            pos,
        });
        if enemy_down {
            kill_enemy(world, enemy);
        }
    }

    /// Push `mover` out of `other` along the axis it came in on
    ///
    /// Boxes that already overlapped on X last frame must have closed in
    /// vertically, so the Y overlap is resolved, and vice versa.
    fn separate(world: &mut World, mover: EntityId, other: EntityId) {
        let Some((m, o)) = world.entities.get_pair_mut(mover, other) else {
            return;
        };
        if !o.is_active() || !intersects(m, o) {
            return;
        }
        let current = overlap(m, o);
        let previous = previous_overlap(m, o);
        let other_pos = o.get::<Transform>().pos;
        let transform = m.get_mut::<Transform>();

        if previous.x > 0.0 {
            transform.velocity.y = 0.0;
            if transform.prev_pos.y < other_pos.y {
                transform.pos.y -= current.y;
            } else {
                transform.pos.y += current.y;
            }
        } else if previous.y > 0.0 {
            transform.velocity.x = 0.0;
            if transform.prev_pos.x < other_pos.x {
                transform.pos.x -= current.x;
            } else {
                transform.pos.x += current.x;
            }
        }
    }

    fn collect_gems(world: &mut World, player: EntityId) {
        let gems = world.entities.tagged(Tag::Gem).to_vec();
        for gem in gems {
            let Some((g, p)) = world.entities.get_pair_mut(gem, player) else {
                continue;
            };
            if !g.is_active() || !intersects(g, p) {
                continue;
            }
            g.destroy();
            let value = g.get::<Score>().value;
            p.get_mut::<Score>().value += value;
            world.emit(GameEvent::GemCollected { value });
        }
    }
}

impl System for CollisionSystem {
    fn run(&mut self, world: &mut World) {
        let player = world.player_id();
        if !Self::is_fighting(world, player) {
            return;
        }
        let enemies = world.entities.tagged(Tag::Enemy).to_vec();
        let attacks = world.entities.tagged(Tag::PlayerAttack).to_vec();

        for &enemy in &enemies {
            if !Self::is_fighting(world, enemy) {
                continue;
            }

            Self::enemy_vs_player(world, enemy, player);
            if !Self::is_fighting(world, player) {
                return;
            }

            for &attack in &attacks {
                if !Self::is_fighting(world, enemy) {
                    break;
                }
                Self::enemy_vs_attack(world, enemy, attack);
            }

            if !Self::is_fighting(world, enemy) {
                continue;
            }
            for &other in &enemies {
                if other != enemy {
                    Self::separate(world, enemy, other);
                }
            }
        }

        Self::collect_gems(world, player);
    }

    fn name(&self) -> &str {
        "collision"
    }
}
