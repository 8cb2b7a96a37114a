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
//! Weapon upgrades
//!
//! Each level-up offers a shuffled handful of the player's weapons that are
//! still below the level cap. Applying an upgrade bumps that weapon's stats
//! along its own progression and raises its level by one.

use crate::config::WeaponStats;
use crate::ecs::components::{Arsenal, Weapon};
use crate::error::{SimError, SimResult};
use crate::kinds::WeaponKind;
use rand::seq::SliceRandom;
use rand::Rng;

/// Up to `count` distinct equipped weapons below `max_level`, shuffled
pub fn offer_choices<R: Rng + ?Sized>(
    arsenal: &Arsenal,
    max_level: u32,
    count: usize,
    rng: &mut R,
) -> Vec<WeaponKind> {
    let mut eligible: Vec<WeaponKind> = arsenal
        .weapons
        .iter()
        .filter(|w| w.level < max_level)
        .map(|w| w.kind)
        .collect();
    eligible.shuffle(rng);
    eligible.truncate(count);
    eligible
}

/// Improve `stats` by one step of the `kind` progression
///
/// Damage grows with the weapon's current `level`, so later upgrades are
/// worth more.
pub fn upgrade_stats(kind: WeaponKind, stats: &mut WeaponStats, level: u32) {
    let level = level as i32;
    let cooldown_cut = match kind {
        WeaponKind::Slash => 3,
        WeaponKind::RangedSlash => 15,
        WeaponKind::FireRing => 20,
        WeaponKind::Whirlpool => 25,
        WeaponKind::Explosion => 6,
        WeaponKind::LaserBullet => 3,
    };
    stats.cooldown = stats.cooldown.saturating_sub(cooldown_cut).max(1);

    match kind {
        WeaponKind::Slash => {
            stats.scale += 0.1;
            stats.duration += 3;
            stats.damage += 5 * level;
            stats.pierce += 10;
            stats.knockback.magnitude += 0.5;
        }
        WeaponKind::RangedSlash => {
            stats.scale += 0.1;
            stats.duration += 6;
            stats.speed += 1.0;
            stats.damage += 5 * level;
            stats.pierce += 15;
            stats.knockback.magnitude += 0.5;
        }
        WeaponKind::FireRing => {
            stats.scale += 0.2;
            stats.damage += 5 * level;
            stats.pierce += 100;
            stats.knockback.magnitude += 0.5;
        }
        WeaponKind::Whirlpool => {
            stats.scale += 0.2;
            stats.duration += 25;
            stats.damage += 5 * level;
            stats.pierce += 100;
            stats.attract_radius += 15.0;
        }
        WeaponKind::Explosion => {
            stats.scale += 0.2;
            stats.duration += 6;
            stats.damage += 10 * level;
            stats.pierce += 10;
            stats.knockback.magnitude += 1.5;
        }
        WeaponKind::LaserBullet => {
            stats.scale += 0.2;
            stats.duration += 3;
            stats.speed += 1.0;
            stats.damage += 5 * level;
            stats.pierce += 5;
        }
    }
}

/// Upgrade an equipped weapon, returning its new level
pub fn apply_upgrade(arsenal: &mut Arsenal, kind: WeaponKind, max_level: u32) -> SimResult<u32> {
    let weapon = arsenal
        .get_mut(kind)
        .ok_or(SimError::WeaponNotEquipped(kind))?;
    if weapon.level >= max_level {
        return Err(SimError::WeaponMaxed {
            kind,
            level: max_level,
        });
    }
    upgrade_stats(kind, &mut weapon.stats, weapon.level);
    weapon.level += 1;
    Ok(weapon.level)
}

/// Equip a new weapon at level 1
pub fn grant_weapon(arsenal: &mut Arsenal, kind: WeaponKind, stats: WeaponStats) -> SimResult<()> {
    if arsenal.has(kind) {
        return Err(SimError::WeaponAlreadyEquipped(kind));
    }
    arsenal.weapons.push(Weapon::new(kind, stats));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeaponTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn arsenal(kinds: &[WeaponKind]) -> Arsenal {
        let table = WeaponTable::default();
        Arsenal {
            weapons: kinds
                .iter()
                .map(|&k| Weapon::new(k, table.get(k).clone()))
                .collect(),
        }
    }

    #[test]
    fn test_slash_progression() {
        let mut arsenal = arsenal(&[WeaponKind::Slash]);
        let before = arsenal.get(WeaponKind::Slash).unwrap().stats.clone();
        assert_eq!(apply_upgrade(&mut arsenal, WeaponKind::Slash, 10).unwrap(), 2);

        let after = &arsenal.get(WeaponKind::Slash).unwrap().stats;
        assert_eq!(after.cooldown, before.cooldown - 3);
        assert_eq!(after.duration, before.duration + 3);
        assert_eq!(after.damage, before.damage + 5);
        assert_eq!(after.pierce, before.pierce + 10);
        assert!((after.scale - before.scale - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_damage_growth_scales_with_level() {
        let mut stats = WeaponStats::default();
        upgrade_stats(WeaponKind::Explosion, &mut stats, 3);
        assert_eq!(stats.damage, WeaponStats::default().damage + 30);
    }

    #[test]
    fn test_cooldown_floor() {
        let mut stats = WeaponStats {
            cooldown: 10,
            ..WeaponStats::default()
        };
        upgrade_stats(WeaponKind::Whirlpool, &mut stats, 1);
        assert_eq!(stats.cooldown, 1);
    }

    #[test]
    fn test_upgrade_errors() {
        let mut arsenal = arsenal(&[WeaponKind::Slash]);
        assert!(matches!(
            apply_upgrade(&mut arsenal, WeaponKind::FireRing, 10),
            Err(SimError::WeaponNotEquipped(WeaponKind::FireRing))
        ));
        arsenal.get_mut(WeaponKind::Slash).unwrap().level = 10;
        assert!(matches!(
            apply_upgrade(&mut arsenal, WeaponKind::Slash, 10),
            Err(SimError::WeaponMaxed { .. })
        ));
    }

    #[test]
    fn test_offer_skips_maxed_and_caps_count() {
        let mut arsenal = arsenal(&WeaponKind::ALL);
        arsenal.get_mut(WeaponKind::Explosion).unwrap().level = 10;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let choices = offer_choices(&arsenal, 10, 3, &mut rng);
        assert_eq!(choices.len(), 3);
        assert!(!choices.contains(&WeaponKind::Explosion));
        let mut unique = choices.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_grant_weapon_once() {
        let mut arsenal = arsenal(&[WeaponKind::Slash]);
        grant_weapon(&mut arsenal, WeaponKind::LaserBullet, WeaponStats::default()).unwrap();
        assert_eq!(arsenal.get(WeaponKind::LaserBullet).unwrap().level, 1);
        assert!(grant_weapon(&mut arsenal, WeaponKind::Slash, WeaponStats::default()).is_err());
    }
}
