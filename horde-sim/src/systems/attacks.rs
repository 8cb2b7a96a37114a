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
//! Player weapon fire
//!
//! Every equipped weapon whose cooldown has elapsed may fire once per
//! frame. With auto-attack on, all weapons aim at the nearest enemy and
//! hold fire when none is in range. Otherwise the primary attack input
//! fires the slash and the secondary input fires everything else, both at
//! the aim point.

use crate::ecs::components::{Arsenal, Input, State, Transform};
use crate::ecs::{System, World};
use crate::events::GameEvent;
use crate::kinds::{Tag, WeaponKind};
use crate::query::nearest;
use crate::spawn::spawn_attack;
use tracing::trace;

/// Spawns attack hitboxes from the player's arsenal
pub struct PlayerAttackSystem;

impl System for PlayerAttackSystem {
    fn run(&mut self, world: &mut World) {
        let frame = world.frame();
        let player = world.entities.player();
        if player.get::<State>().is_dead() {
            return;
        }
        let player_id = player.id();
        let origin = player.get::<Transform>().pos;
        let input = *player.get::<Input>();
        let ready: Vec<_> = player
            .get::<Arsenal>()
            .weapons
            .iter()
            .filter(|w| w.is_ready(frame))
            .map(|w| (w.kind, w.stats.clone()))
            .collect();
        if ready.is_empty() {
            return;
        }

        let auto_target = if input.auto_attack {
            let range = world.config.combat.auto_aim_range;
            match nearest(&world.entities, origin, Tag::Enemy, range)
                .and_then(|id| world.entities.get(id))
            {
                Some(enemy) => Some(enemy.get::<Transform>().pos),
                None => return,
            }
        } else {
            None
        };

        let mut fired = Vec::new();
        for (kind, stats) in ready {
            let target = match auto_target {
                Some(target) => target,
                None => {
                    let pressed = match kind {
                        WeaponKind::Slash => input.basic_attack,
                        _ => input.special_attack,
                    };
                    if !pressed {
                        continue;
                    }
                    input.aim
                }
            };
            let id = spawn_attack(world, player_id, origin, kind, &stats, target);
            trace!(%id, ?kind, frame, "attack launched");
            world.emit(GameEvent::AttackLaunched { id, weapon: kind });
            fired.push(kind);
        }

        if fired.is_empty() {
            return;
        }
        let arsenal = world.entities.player_mut().get_mut::<Arsenal>();
        for kind in fired {
            if let Some(weapon) = arsenal.get_mut(kind) {
                weapon.last_fired = Some(frame);
            }
        }
    }

    fn name(&self) -> &str {
        "player_attacks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::kinds::{EnemyKind, Kind};
    use crate::spawn::{spawn_enemy, spawn_player};

    fn setup() -> World {
        let mut world = World::default();
        spawn_player(&mut world);
        world.entities.flush();
        world
    }

    fn attack_kinds(world: &World) -> Vec<Kind> {
        world
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::AttackLaunched { weapon, .. } => Some(Kind::Attack(*weapon)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_input_fires_nothing() {
        let mut world = setup();
        PlayerAttackSystem.run(&mut world);
        assert_eq!(world.entities.pending_len(), 0);
    }

    #[test]
    fn test_basic_attack_fires_slash_only() {
        let mut world = setup();
        world.entities.player_mut().get_mut::<Input>().basic_attack = true;
        PlayerAttackSystem.run(&mut world);
        assert_eq!(attack_kinds(&world), vec![Kind::Attack(WeaponKind::Slash)]);
    }

    #[test]
    fn test_cooldown_blocks_refire() {
        let mut world = setup();
        world.entities.player_mut().get_mut::<Input>().basic_attack = true;
        PlayerAttackSystem.run(&mut world);
        world.tick();
        PlayerAttackSystem.run(&mut world);
        assert_eq!(world.entities.pending_len(), 1);

        let cooldown = world.config.weapon(WeaponKind::Slash).cooldown;
        for _ in 1..cooldown {
            world.tick();
        }
        PlayerAttackSystem.run(&mut world);
        assert_eq!(world.entities.pending_len(), 2);
    }

    #[test]
    fn test_auto_attack_needs_target() {
        let mut world = setup();
        world.entities.player_mut().get_mut::<Input>().auto_attack = true;
        PlayerAttackSystem.run(&mut world);
        assert_eq!(world.entities.pending_len(), 0);

        let player = world.player_id();
        let pos = world.entities.player().get::<Transform>().pos + Vec2::new(100.0, 0.0);
        spawn_enemy(&mut world, EnemyKind::ChainBot, pos, player);
        world.entities.flush();
        PlayerAttackSystem.run(&mut world);
        assert_eq!(
            attack_kinds(&world),
            vec![
                Kind::Attack(WeaponKind::Slash),
                Kind::Attack(WeaponKind::RangedSlash)
            ]
        );
    }
}
