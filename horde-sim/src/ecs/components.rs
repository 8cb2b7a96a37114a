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
//! Gameplay components
//!
//! Plain data records attached to entities. Each one fills a slot in the
//! fixed component set declared in [`crate::ecs::component`]; an absent
//! slot reads as the record's `Default`.

use crate::config::WeaponStats;
use crate::ecs::EntityId;
use crate::geometry::Vec2;
use crate::kinds::{Tag, WeaponKind};
use serde::{Deserialize, Serialize};

/// Position, motion and orientation of an entity
///
/// `accel` is a scalar speed delta applied every frame along the current
/// heading, not a vector acceleration. Negative values decelerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Current position
    pub pos: Vec2,
    /// Position before the last integration step
    pub prev_pos: Vec2,
    /// Uniform scale factor
    pub scale: f32,
    /// Displacement per frame
    pub velocity: Vec2,
    /// Rotation in degrees
    pub angle: f32,
    /// Per-frame change of speed
    pub accel: f32,
}

impl Transform {
    /// Create a stationary transform at `pos`
    pub fn new(pos: Vec2) -> Self {
        Transform {
            pos,
            prev_pos: pos,
            ..Default::default()
        }
    }

    /// Builder-style velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style rotation
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Builder-style acceleration
    pub fn with_accel(mut self, accel: f32) -> Self {
        self.accel = accel;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            scale: 1.0,
            velocity: Vec2::ZERO,
            angle: 0.0,
            accel: 0.0,
        }
    }
}

/// Axis-aligned bounding box centered on the entity position
///
/// The half size is derived from the size on every write, so the two can
/// never disagree.
///
/// # Examples
///
/// ```
/// use horde_sim::ecs::components::BoundingBox;
/// use horde_sim::geometry::Vec2;
///
/// let mut bb = BoundingBox::new(Vec2::new(32.0, 16.0));
/// assert_eq!(bb.half_size(), Vec2::new(16.0, 8.0));
/// bb.set_size(Vec2::new(10.0, 10.0));
/// assert_eq!(bb.half_size(), Vec2::new(5.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    size: Vec2,
    half_size: Vec2,
}

impl BoundingBox {
    /// Create a bounding box of the given full size
    pub fn new(size: Vec2) -> Self {
        BoundingBox {
            size,
            half_size: size / 2.0,
        }
    }

    /// Full extent
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Half extent on each axis
    pub fn half_size(&self) -> Vec2 {
        self.half_size
    }

    /// Resize the box, keeping the half size in step
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.half_size = size / 2.0;
    }
}

/// Hit points and the invulnerability bookkeeping for damage gating
///
/// For attacks the hit points act as a pierce budget that drains as the
/// hitbox strikes enemies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Health {
    /// Remaining hit points
    pub current: i32,
    /// Hit points at full health
    pub max: i32,
    /// Frame of the last accepted hit, `None` until first hit
    pub last_damage_frame: Option<u64>,
    /// Frames after a hit during which further hits are ignored
    pub invulnerability: u64,
}

impl Health {
    /// Full health with the given invulnerability window
    pub fn new(max: i32, invulnerability: u64) -> Self {
        Health {
            current: max,
            max,
            last_damage_frame: None,
            invulnerability,
        }
    }

    /// Whether a hit landing on `frame` would be accepted
    pub fn can_be_hit(&self, frame: u64) -> bool {
        match self.last_damage_frame {
            None => true,
            Some(last) => frame.saturating_sub(last) >= self.invulnerability,
        }
    }

    /// Whether the entity has run out of hit points
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Remaining fraction of max health, clamped to `[0, 1]`
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

/// Damage dealt to whatever this entity touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Damage {
    /// Hit points removed per accepted contact
    pub amount: i32,
}

impl Damage {
    /// Create a damage record
    pub fn new(amount: i32) -> Self {
        Damage { amount }
    }
}

/// Movement and attack intent written by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    /// Move up held
    pub up: bool,
    /// Move down held
    pub down: bool,
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Primary attack held
    pub basic_attack: bool,
    /// Secondary attack held
    pub special_attack: bool,
    /// Fire every weapon at the nearest enemy automatically
    pub auto_attack: bool,
    /// Render hitboxes (consumed by the renderer only)
    pub display_hitbox: bool,
    /// Aim point in world space
    pub aim: Vec2,
}

impl Input {
    /// Sum of the held direction keys, not normalized
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// A discrete input action, as produced by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    /// Move up
    Up,
    /// Move down
    Down,
    /// Move left
    Left,
    /// Move right
    Right,
    /// Primary attack
    BasicAttack,
    /// Secondary attack
    SpecialAttack,
    /// Flip auto-attack on press
    ToggleAutoAttack,
    /// Flip hitbox display on press
    ToggleHitbox,
    /// Move the aim point (world space)
    Aim(Vec2),
}

impl Input {
    /// Record the start (`pressed`) or end of an action
    ///
    /// Held actions follow the press state; toggles flip on press and
    /// ignore the release; aim updates regardless.
    pub fn apply(&mut self, intent: Intent, pressed: bool) {
        match intent {
            Intent::Up => self.up = pressed,
            Intent::Down => self.down = pressed,
            Intent::Left => self.left = pressed,
            Intent::Right => self.right = pressed,
            Intent::BasicAttack => self.basic_attack = pressed,
            Intent::SpecialAttack => self.special_attack = pressed,
            Intent::ToggleAutoAttack if pressed => self.auto_attack = !self.auto_attack,
            Intent::ToggleHitbox if pressed => self.display_hitbox = !self.display_hitbox,
            Intent::ToggleAutoAttack | Intent::ToggleHitbox => {}
            Intent::Aim(point) => self.aim = point,
        }
    }
}

/// Behavior state label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateLabel {
    /// Player standing still
    #[default]
    Idle,
    /// Player moving
    Running,
    /// Enemy pursuing normally
    Alive,
    /// Enemy being pushed back after a hit
    Knockback,
    /// Out of health; awaiting reap
    Dead,
}

/// Behavior state consumed by AI gating and animation selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    /// Current label
    pub label: StateLabel,
}

impl State {
    /// Create a state with the given label
    pub fn new(label: StateLabel) -> Self {
        State { label }
    }

    /// Whether the entity is dead
    pub fn is_dead(&self) -> bool {
        self.label == StateLabel::Dead
    }
}

/// Accumulated score and level progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    /// Points collected so far, or the value awarded when this entity is
    /// killed or picked up
    pub value: u32,
    /// Threshold of the level just reached
    pub prev_threshold: u32,
    /// Threshold of the next level
    pub next_threshold: u32,
    /// Current level, starting at 1
    pub level: u32,
}

impl Score {
    /// A bare value with no level progression, for enemies and gems
    pub fn worth(value: u32) -> Self {
        Score {
            value,
            ..Default::default()
        }
    }

    /// Fresh progression towards the first level-up
    pub fn progression(first_threshold: u32) -> Self {
        Score {
            value: 0,
            prev_threshold: 0,
            next_threshold: first_threshold,
            level: 1,
        }
    }

    /// Progress between the previous and next threshold in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let span = self.next_threshold.saturating_sub(self.prev_threshold);
        if span == 0 {
            return 0.0;
        }
        let into = self.value.saturating_sub(self.prev_threshold);
        (into as f32 / span as f32).clamp(0.0, 1.0)
    }
}

/// Active push-back applied to an entity after a hit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Knockback {
    /// Initial push speed before scaling
    pub magnitude: f32,
    /// Total frames the push lasts
    pub duration: u64,
    /// Frames left before the push ends
    pub remaining: u64,
    /// Whether the push is in effect
    pub active: bool,
}

impl Knockback {
    /// A freshly applied push
    pub fn start(magnitude: f32, duration: u64) -> Self {
        Knockback {
            magnitude,
            duration,
            remaining: duration,
            active: true,
        }
    }
}

/// Push-back this entity inflicts on whatever it damages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KnockbackSpec {
    /// Push speed handed to the receiver
    pub magnitude: f32,
    /// Push length in frames
    pub duration: u64,
}

impl KnockbackSpec {
    /// Create a knockback spec
    pub fn new(magnitude: f32, duration: u64) -> Self {
        KnockbackSpec {
            magnitude,
            duration,
        }
    }
}

/// Pulls entities of one tag towards this entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    /// Pull strength; speed at distance `d` is `strength / d`
    pub strength: f32,
    /// Reach of the pull
    pub radius: f32,
    /// Tag of the entities being pulled
    pub pulls: Tag,
}

impl Default for Attractor {
    fn default() -> Self {
        Attractor {
            strength: 0.0,
            radius: 0.0,
            pulls: Tag::Gem,
        }
    }
}

/// Steer towards another entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Follow {
    /// Entity being pursued
    pub target: EntityId,
    /// Fraction of the velocity error corrected per frame
    pub steering_scale: f32,
    /// Cruise speed
    pub speed: f32,
}

impl Follow {
    /// Create a follow relationship
    pub fn new(target: EntityId, steering_scale: f32, speed: f32) -> Self {
        Follow {
            target,
            steering_scale,
            speed,
        }
    }
}

/// Self-destruct after a number of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifespan {
    /// Frames the entity may live
    pub duration: u64,
    /// Frame the entity was created on
    pub frame_created: u64,
}

impl Lifespan {
    /// Create a lifespan starting at `frame_created`
    pub fn new(duration: u64, frame_created: u64) -> Self {
        Lifespan {
            duration,
            frame_created,
        }
    }

    /// Whether the lifespan has run out on `frame`
    pub fn is_expired(&self, frame: u64) -> bool {
        frame.saturating_sub(self.frame_created) > self.duration
    }

    /// Elapsed fraction in `[0, 1]`, used to fade out text
    pub fn progress(&self, frame: u64) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = frame.saturating_sub(self.frame_created);
        (elapsed as f32 / self.duration as f32).min(1.0)
    }
}

/// Copy another entity's velocity each frame before integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveWithVelocityOf {
    /// Entity whose velocity is mirrored
    pub target: EntityId,
}

impl MoveWithVelocityOf {
    /// Create a velocity link
    pub fn new(target: EntityId) -> Self {
        MoveWithVelocityOf { target }
    }
}

/// An equipped weapon with its current stats
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    /// Weapon type
    pub kind: WeaponKind,
    /// Current, possibly upgraded, stats
    pub stats: WeaponStats,
    /// Upgrade level, starting at 1
    pub level: u32,
    /// Frame the weapon last fired, `None` if never
    pub last_fired: Option<u64>,
}

impl Weapon {
    /// A level-1 weapon with base stats
    pub fn new(kind: WeaponKind, stats: WeaponStats) -> Self {
        Weapon {
            kind,
            stats,
            level: 1,
            last_fired: None,
        }
    }

    /// Whether the cooldown has elapsed on `frame`
    pub fn is_ready(&self, frame: u64) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => frame.saturating_sub(last) >= self.stats.cooldown,
        }
    }
}

/// Weapons carried by the player
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arsenal {
    /// Equipped weapons in firing order
    pub weapons: Vec<Weapon>,
}

impl Arsenal {
    /// Look up an equipped weapon
    pub fn get(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind == kind)
    }

    /// Look up an equipped weapon mutably
    pub fn get_mut(&mut self, kind: WeaponKind) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.kind == kind)
    }

    /// Whether a weapon of this kind is equipped
    pub fn has(&self, kind: WeaponKind) -> bool {
        self.get(kind).is_some()
    }
}

/// Floating damage number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageText {
    /// Damage shown
    pub amount: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_half_size_tracks_size() {
        let mut bb = BoundingBox::new(Vec2::new(20.0, 40.0));
        assert_eq!(bb.half_size(), bb.size() / 2.0);
        bb.set_size(Vec2::new(7.0, 3.0));
        assert_eq!(bb.half_size(), Vec2::new(3.5, 1.5));
        assert_eq!(BoundingBox::default().half_size(), Vec2::ZERO);
    }

    #[test]
    fn test_health_gate() {
        let mut health = Health::new(100, 10);
        assert!(health.can_be_hit(0));
        health.last_damage_frame = Some(5);
        assert!(!health.can_be_hit(14));
        assert!(health.can_be_hit(15));
    }

    #[test]
    fn test_zero_window_always_accepts() {
        let mut health = Health::new(1, 0);
        health.last_damage_frame = Some(3);
        assert!(health.can_be_hit(3));
    }

    #[test]
    fn test_input_direction() {
        let input = Input {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(1.0, -1.0));

        let cancelled = Input {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(cancelled.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_input_toggles_on_press_only() {
        let mut input = Input::default();
        input.apply(Intent::ToggleAutoAttack, true);
        input.apply(Intent::ToggleAutoAttack, false);
        assert!(input.auto_attack);
        input.apply(Intent::ToggleAutoAttack, true);
        assert!(!input.auto_attack);

        input.apply(Intent::Left, true);
        assert!(input.left);
        input.apply(Intent::Left, false);
        assert!(!input.left);

        input.apply(Intent::Aim(Vec2::new(4.0, 2.0)), false);
        assert_eq!(input.aim, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_lifespan_expiry_is_strict() {
        let life = Lifespan::new(10, 5);
        assert!(!life.is_expired(15));
        assert!(life.is_expired(16));
        assert_eq!(life.progress(10), 0.5);
    }

    #[test]
    fn test_score_progress() {
        let mut score = Score::progression(10);
        score.value = 5;
        assert_eq!(score.progress(), 0.5);
        assert_eq!(Score::worth(3).level, 0);
    }

    #[test]
    fn test_transform_default_scale() {
        let t = Transform::new(Vec2::new(1.0, 2.0));
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.prev_pos, t.pos);
    }
}
