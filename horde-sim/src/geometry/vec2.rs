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
//! Two-dimensional vector primitive
//!
//! All simulation space is measured in pixels and all motion in pixels per
//! frame, so single-precision floats are plenty.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector used for positions, velocities, sizes and directions
///
/// # Examples
///
/// ```
/// use horde_sim::geometry::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.normalize(), Vec2::new(0.6, 0.8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component, growing to the right
    pub x: f32,
    /// Vertical component, growing downwards
    pub y: f32,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Unit vector pointing along `degrees`, measured clockwise from +x
    pub fn from_angle(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length, for comparisons that don't need the root
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Distance to another point
    pub fn distance(&self, other: Vec2) -> f32 {
        (other - *self).length()
    }

    /// Squared distance to another point
    pub fn distance_squared(&self, other: Vec2) -> f32 {
        (other - *self).length_squared()
    }

    /// Unit vector in the same direction
    ///
    /// A zero vector has no direction and is returned unchanged rather than
    /// producing NaNs.
    pub fn normalize(&self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Angle of the vector in degrees, as used for sprite rotation
    pub fn angle_degrees(&self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Component-wise absolute value
    pub fn abs(&self) -> Vec2 {
        Vec2::new(self.x.abs(), self.y.abs())
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_is_identity() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vec2::new(-7.0, 24.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!(n.x < 0.0 && n.y > 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let mut v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        v -= Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(3.0, 5.0));
        assert_eq!(v * 2.0, Vec2::new(6.0, 10.0));
        assert_eq!(v / 2.0, Vec2::new(1.5, 2.5));
        assert_eq!(-v, Vec2::new(-3.0, -5.0));
    }

    #[test]
    fn test_angle_round_trip() {
        let dir = Vec2::from_angle(90.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y - 1.0).abs() < 1e-6);
        assert!((dir.angle_degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }
}
