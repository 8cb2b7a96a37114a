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
//! Entity categories and subtypes
//!
//! Every entity carries a [`Tag`] (the coarse category used by the tag index
//! and by systems to pick their working sets) and a [`Kind`] (the concrete
//! subtype used to look up stats and to drive animation selection).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// The single player-controlled character
    Player,
    /// Hostile units chasing the player
    Enemy,
    /// Hitboxes spawned by the player's weapons
    PlayerAttack,
    /// Experience gems dropped by dead enemies
    Gem,
    /// Floating damage numbers
    DisappearingText,
}

impl Tag {
    /// Name used by render and audio collaborators
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Player => "player",
            Tag::Enemy => "enemy",
            Tag::PlayerAttack => "playerAttack",
            Tag::Gem => "gem",
            Tag::DisappearingText => "disappearingText",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enemy subtypes, each with its own stat row in the config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    /// Small, fast-spawning melee bot
    ChainBot,
    /// Small wheeled bot, a little tougher
    BotWheel,
    /// Double-sized chain bot
    BigChainBot,
    /// Double-sized wheeled bot
    BigBotWheel,
}

impl EnemyKind {
    /// Number of enemy kinds
    pub const COUNT: usize = 4;

    /// All enemy kinds, in spawn-table order
    pub const ALL: [EnemyKind; EnemyKind::COUNT] = [
        EnemyKind::ChainBot,
        EnemyKind::BotWheel,
        EnemyKind::BigChainBot,
        EnemyKind::BigBotWheel,
    ];

    /// Index into per-kind arrays
    pub fn index(&self) -> usize {
        match self {
            EnemyKind::ChainBot => 0,
            EnemyKind::BotWheel => 1,
            EnemyKind::BigChainBot => 2,
            EnemyKind::BigBotWheel => 3,
        }
    }

    /// Animation family; big variants reuse the small variant's sprites
    pub fn sprite_family(&self) -> &'static str {
        match self {
            EnemyKind::ChainBot | EnemyKind::BigChainBot => "chainBot",
            EnemyKind::BotWheel | EnemyKind::BigBotWheel => "botWheel",
        }
    }
}

/// Player weapon subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponKind {
    /// Short melee arc carried along with the player
    Slash,
    /// Decelerating slash projectile
    RangedSlash,
    /// Ring of fire centered on the player
    FireRing,
    /// Vortex placed at the target that drags enemies in
    Whirlpool,
    /// Short-lived blast at the target with heavy knockback
    Explosion,
    /// Fast, narrow projectile
    LaserBullet,
}

impl WeaponKind {
    /// All weapon kinds
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Slash,
        WeaponKind::RangedSlash,
        WeaponKind::FireRing,
        WeaponKind::Whirlpool,
        WeaponKind::Explosion,
        WeaponKind::LaserBullet,
    ];

    /// Whether the spawned hitbox rides along with the player
    pub fn follows_player(&self) -> bool {
        matches!(self, WeaponKind::Slash | WeaponKind::FireRing)
    }

    /// Whether the hitbox is placed at the aim point instead of near the player
    pub fn placed_at_target(&self) -> bool {
        matches!(self, WeaponKind::Whirlpool | WeaponKind::Explosion)
    }

    /// Whether the hitbox flies away from the player
    pub fn is_projectile(&self) -> bool {
        matches!(self, WeaponKind::RangedSlash | WeaponKind::LaserBullet)
    }
}

/// Concrete entity subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "variant")]
pub enum Kind {
    /// The player character
    Hero,
    /// An enemy of the given kind
    Enemy(EnemyKind),
    /// A hitbox spawned by the given weapon
    Attack(WeaponKind),
    /// Experience gem
    ScoreGem,
    /// Floating damage number
    DamageNumber,
}

impl Kind {
    /// Tag an entity of this kind is filed under
    pub fn tag(&self) -> Tag {
        match self {
            Kind::Hero => Tag::Player,
            Kind::Enemy(_) => Tag::Enemy,
            Kind::Attack(_) => Tag::PlayerAttack,
            Kind::ScoreGem => Tag::Gem,
            Kind::DamageNumber => Tag::DisappearingText,
        }
    }

    /// The enemy subtype, if any
    pub fn enemy(&self) -> Option<EnemyKind> {
        match self {
            Kind::Enemy(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The weapon subtype, if any
    pub fn weapon(&self) -> Option<WeaponKind> {
        match self {
            Kind::Attack(kind) => Some(*kind),
            _ => None,
        }
    }
}
