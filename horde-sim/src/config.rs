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
//! Simulation configuration
//!
//! Every gameplay constant lives in [`GameConfig`]: player stats, the enemy
//! and weapon tables, spawn pacing and combat tuning. The config can be
//! loaded from TOML; any omitted field falls back to its default, so a file
//! only needs the values it changes.
//!
//! ```
//! use horde_sim::config::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     schema_version = "0.2.0"
//!     seed = 7
//!
//!     [player]
//!     speed = 4.0
//! "#).unwrap();
//! assert_eq!(config.player.speed, 4.0);
//! assert_eq!(config.player.health, 100);
//! ```

use crate::ecs::components::KnockbackSpec;
use crate::error::{SimError, SimResult};
use crate::geometry::Vec2;
use crate::kinds::{EnemyKind, WeaponKind};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Config schema version understood by this build
pub const CONFIG_SCHEMA_VERSION: &str = "0.2.0";

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Schema version the file was written against
    pub schema_version: String,
    /// Seed for spawn angles, gem scatter and upgrade shuffles
    pub seed: u64,
    /// Rebuild the level automatically when the player dies
    pub restart_on_death: bool,
    /// Player stats
    pub player: PlayerConfig,
    /// Enemy stat table
    pub enemies: EnemyTable,
    /// Weapon stat table
    pub weapons: WeaponTable,
    /// Enemy spawning
    pub director: DirectorConfig,
    /// Dropped gems
    pub gem: GemConfig,
    /// Combat tuning
    pub combat: CombatConfig,
    /// Level progression
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            seed: 0x5eed,
            restart_on_death: true,
            player: PlayerConfig::default(),
            enemies: EnemyTable::default(),
            weapons: WeaponTable::default(),
            director: DirectorConfig::default(),
            gem: GemConfig::default(),
            combat: CombatConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse, schema-check and validate a TOML document
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.check_schema()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading game config");
        Self::from_toml_str(&text)
    }

    /// Stats for an enemy kind
    pub fn enemy(&self, kind: EnemyKind) -> &EnemyConfig {
        self.enemies.get(kind)
    }

    /// Base stats for a weapon kind
    pub fn weapon(&self, kind: WeaponKind) -> &WeaponStats {
        self.weapons.get(kind)
    }

    /// Check the declared schema version against [`CONFIG_SCHEMA_VERSION`]
    pub fn check_schema(&self) -> SimResult<()> {
        let found = parse_version(&self.schema_version)?;
        let expected = parse_version(CONFIG_SCHEMA_VERSION)?;
        if is_schema_compatible(&found, &expected) {
            Ok(())
        } else {
            Err(SimError::IncompatibleSchema {
                found: self.schema_version.clone(),
                expected: CONFIG_SCHEMA_VERSION.to_string(),
            })
        }
    }

    /// Reject values the systems cannot work with
    pub fn validate(&self) -> SimResult<()> {
        let player = &self.player;
        ensure(player.speed.is_finite() && player.speed > 0.0, "player.speed must be positive")?;
        ensure(player.health > 0, "player.health must be positive")?;
        ensure(player.size.x > 0.0 && player.size.y > 0.0, "player.size must be positive")?;
        for (i, kind) in player.weapons.iter().enumerate() {
            ensure(
                !player.weapons[..i].contains(kind),
                &format!("player.weapons lists {:?} twice", kind),
            )?;
        }

        for kind in EnemyKind::ALL {
            let enemy = self.enemy(kind);
            ensure(enemy.health > 0, &format!("enemy {kind:?} health must be positive"))?;
            ensure(enemy.scale > 0.0, &format!("enemy {kind:?} scale must be positive"))?;
            ensure(enemy.speed >= 0.0, &format!("enemy {kind:?} speed must not be negative"))?;
            ensure(
                enemy.spawn_interval > 0,
                &format!("enemy {kind:?} spawn_interval must be positive"),
            )?;
        }

        for kind in WeaponKind::ALL {
            let weapon = self.weapon(kind);
            ensure(weapon.cooldown > 0, &format!("weapon {kind:?} cooldown must be positive"))?;
            ensure(weapon.scale > 0.0, &format!("weapon {kind:?} scale must be positive"))?;
            ensure(weapon.pierce > 0, &format!("weapon {kind:?} pierce must be positive"))?;
        }

        ensure(self.combat.knockback_decel >= 0.0, "combat.knockback_decel must not be negative")?;
        ensure(self.combat.capture_distance_sq >= 0.0, "combat.capture_distance_sq must not be negative")?;
        ensure(self.scoring.first_threshold > 0, "scoring.first_threshold must be positive")?;
        ensure(self.scoring.min_step > 0, "scoring.min_step must be positive")?;
        ensure(self.scoring.upgrade_choices > 0, "scoring.upgrade_choices must be positive")?;
        Ok(())
    }
}

fn ensure(condition: bool, message: &str) -> SimResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(message.to_string()))
    }
}

fn parse_version(version: &str) -> SimResult<Version> {
    Version::parse(version).map_err(|source| SimError::InvalidSchemaVersion {
        version: version.to_string(),
        source,
    })
}

/// Majors must match; within 0.x every minor bump is breaking, otherwise
/// files written for an older minor are still readable.
fn is_schema_compatible(found: &Version, expected: &Version) -> bool {
    if found.major != expected.major {
        return false;
    }
    if found.major != 0 {
        found.minor <= expected.minor
    } else {
        found.minor == expected.minor
    }
}

/// Player stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position
    pub spawn: Vec2,
    /// Movement speed in pixels per frame
    pub speed: f32,
    /// Maximum health
    pub health: i32,
    /// Contact damage dealt to enemies
    pub damage: i32,
    /// Hitbox size
    pub size: Vec2,
    /// Frames of invulnerability after a hit
    pub invulnerability: u64,
    /// Push-back applied to enemies on contact
    pub knockback: KnockbackSpec,
    /// Gem pull strength
    pub magnet_strength: f32,
    /// Gem pull radius
    pub magnet_radius: f32,
    /// Weapons equipped at spawn
    pub weapons: Vec<WeaponKind>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            spawn: Vec2::new(640.0, 360.0),
            speed: 3.0,
            health: 100,
            damage: 10,
            size: Vec2::new(32.0, 48.0),
            invulnerability: 30,
            knockback: KnockbackSpec::new(10.0, 30),
            magnet_strength: 120.0,
            magnet_radius: 90.0,
            weapons: vec![WeaponKind::Slash, WeaponKind::RangedSlash],
        }
    }
}

/// Stat row for one enemy kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Maximum health
    pub health: i32,
    /// Contact damage
    pub damage: i32,
    /// Cruise speed
    pub speed: f32,
    /// Fraction of the velocity error corrected per frame
    pub steering: f32,
    /// Score credited on kill, also the number of gems dropped
    pub score: u32,
    /// Sprite and hitbox scale
    pub scale: f32,
    /// Unscaled hitbox size
    pub size: Vec2,
    /// Frames between spawns
    pub spawn_interval: u64,
    /// Frames of invulnerability after a hit
    pub invulnerability: u64,
    /// Push-back inflicted on the player, if any
    pub knockback: Option<KnockbackSpec>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            health: 30,
            damage: 10,
            speed: 0.5,
            steering: 0.1,
            score: 1,
            scale: 1.0,
            size: Vec2::new(32.0, 32.0),
            spawn_interval: 60,
            invulnerability: 20,
            knockback: None,
        }
    }
}

/// Stat table indexed by [`EnemyKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    /// Small chain bot
    pub chain_bot: EnemyConfig,
    /// Small wheeled bot
    pub bot_wheel: EnemyConfig,
    /// Large chain bot
    pub big_chain_bot: EnemyConfig,
    /// Large wheeled bot
    pub big_bot_wheel: EnemyConfig,
}

impl EnemyTable {
    /// Stat row for `kind`
    pub fn get(&self, kind: EnemyKind) -> &EnemyConfig {
        match kind {
            EnemyKind::ChainBot => &self.chain_bot,
            EnemyKind::BotWheel => &self.bot_wheel,
            EnemyKind::BigChainBot => &self.big_chain_bot,
            EnemyKind::BigBotWheel => &self.big_bot_wheel,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        EnemyTable {
            chain_bot: EnemyConfig::default(),
            bot_wheel: EnemyConfig {
                health: 40,
                speed: 0.6,
                score: 2,
                spawn_interval: 90,
                ..EnemyConfig::default()
            },
            big_chain_bot: EnemyConfig {
                health: 200,
                damage: 20,
                speed: 0.3,
                score: 6,
                scale: 2.0,
                spawn_interval: 900,
                ..EnemyConfig::default()
            },
            big_bot_wheel: EnemyConfig {
                health: 250,
                damage: 20,
                speed: 0.4,
                score: 8,
                scale: 2.0,
                spawn_interval: 1200,
                ..EnemyConfig::default()
            },
        }
    }
}

/// Stats of one weapon; also the state the upgrade path mutates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    /// Frames between shots
    pub cooldown: u64,
    /// Frames the hitbox lives
    pub duration: u64,
    /// Hitbox scale
    pub scale: f32,
    /// Damage per hit
    pub damage: i32,
    /// Hits the hitbox can absorb before vanishing
    pub pierce: i32,
    /// Push-back inflicted on hit
    pub knockback: KnockbackSpec,
    /// Launch speed for projectiles
    pub speed: f32,
    /// Per-frame speed change for projectiles
    pub decel: f32,
    /// Spawn offset from the player along the aim direction
    pub reach: f32,
    /// Unscaled hitbox size
    pub size: Vec2,
    /// Pull radius for vortex weapons
    pub attract_radius: f32,
    /// Pull strength for vortex weapons
    pub attract_strength: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        WeaponStats {
            cooldown: 60,
            duration: 15,
            scale: 1.0,
            damage: 10,
            pierce: 30,
            knockback: KnockbackSpec::new(5.0, 10),
            speed: 0.0,
            decel: 0.0,
            reach: 30.0,
            size: Vec2::new(48.0, 48.0),
            attract_radius: 0.0,
            attract_strength: 0.0,
        }
    }
}

/// Stat table indexed by [`WeaponKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    /// Melee slash
    pub slash: WeaponStats,
    /// Slash projectile
    pub ranged_slash: WeaponStats,
    /// Ring of fire
    pub fire_ring: WeaponStats,
    /// Vortex
    pub whirlpool: WeaponStats,
    /// Blast
    pub explosion: WeaponStats,
    /// Laser projectile
    pub laser_bullet: WeaponStats,
}

impl WeaponTable {
    /// Stats for `kind`
    pub fn get(&self, kind: WeaponKind) -> &WeaponStats {
        match kind {
            WeaponKind::Slash => &self.slash,
            WeaponKind::RangedSlash => &self.ranged_slash,
            WeaponKind::FireRing => &self.fire_ring,
            WeaponKind::Whirlpool => &self.whirlpool,
            WeaponKind::Explosion => &self.explosion,
            WeaponKind::LaserBullet => &self.laser_bullet,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        WeaponTable {
            slash: WeaponStats::default(),
            ranged_slash: WeaponStats {
                cooldown: 120,
                duration: 60,
                damage: 15,
                pierce: 20,
                knockback: KnockbackSpec::new(4.0, 10),
                speed: 8.0,
                decel: -0.1,
                reach: 0.0,
                ..WeaponStats::default()
            },
            fire_ring: WeaponStats {
                cooldown: 300,
                duration: 120,
                scale: 1.5,
                damage: 5,
                pierce: 200,
                knockback: KnockbackSpec::new(3.0, 8),
                reach: 0.0,
                size: Vec2::new(96.0, 96.0),
                ..WeaponStats::default()
            },
            whirlpool: WeaponStats {
                cooldown: 480,
                duration: 180,
                damage: 2,
                pierce: 300,
                knockback: KnockbackSpec::new(0.0, 0),
                reach: 0.0,
                size: Vec2::new(64.0, 64.0),
                attract_radius: 120.0,
                attract_strength: 60.0,
                ..WeaponStats::default()
            },
            explosion: WeaponStats {
                cooldown: 240,
                duration: 20,
                scale: 1.5,
                damage: 30,
                pierce: 50,
                knockback: KnockbackSpec::new(12.0, 20),
                reach: 0.0,
                size: Vec2::new(80.0, 80.0),
                ..WeaponStats::default()
            },
            laser_bullet: WeaponStats {
                cooldown: 30,
                duration: 90,
                scale: 0.5,
                damage: 8,
                pierce: 10,
                knockback: KnockbackSpec::new(1.0, 5),
                speed: 10.0,
                reach: 0.0,
                size: Vec2::new(32.0, 16.0),
                ..WeaponStats::default()
            },
        }
    }
}

/// Enemy spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Spawn enemies at all
    pub enabled: bool,
    /// Distance from the player at which enemies appear
    pub spawn_radius: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        DirectorConfig {
            enabled: true,
            spawn_radius: 500.0,
        }
    }
}

/// Dropped experience gems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GemConfig {
    /// Hitbox size
    pub size: Vec2,
    /// Scatter distance around the corpse
    pub scatter: f32,
    /// Score per gem
    pub value: u32,
}

impl Default for GemConfig {
    fn default() -> Self {
        GemConfig {
            size: Vec2::new(12.0, 12.0),
            scatter: 10.0,
            value: 1,
        }
    }
}

/// Combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Knockback deceleration per unit of receiver scale
    pub knockback_decel: f32,
    /// Squared distance under which an attractor captures its target
    pub capture_distance_sq: f32,
    /// Frames a dead enemy lingers for its death animation
    pub corpse_frames: u64,
    /// Frames a damage number stays on screen
    pub damage_text_frames: u64,
    /// Upward drift of damage numbers per frame
    pub damage_text_rise: f32,
    /// Auto-attack only targets enemies within this distance
    pub auto_aim_range: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        CombatConfig {
            knockback_decel: 0.2,
            capture_distance_sq: 4.0,
            corpse_frames: 30,
            damage_text_frames: 30,
            damage_text_rise: 0.5,
            auto_aim_range: 1000.0,
        }
    }
}

/// Level progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score needed for the first level-up
    pub first_threshold: u32,
    /// Minimum growth of the threshold per level
    pub min_step: u32,
    /// Weapons stop upgrading at this level
    pub max_weapon_level: u32,
    /// Number of upgrades offered per level-up
    pub upgrade_choices: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            first_threshold: 10,
            min_step: 100,
            max_weapon_level: 10,
            upgrade_choices: 3,
        }
    }
}
