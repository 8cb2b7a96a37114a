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
//! Error types
//!
//! Only recoverable failures surface as [`SimError`]: loading and
//! validating configuration, exporting snapshots and applying upgrades.
//! Broken simulation invariants (for example a missing player) are bugs and
//! panic instead.

use crate::kinds::WeaponKind;
use thiserror::Error;

/// Errors produced by the simulation API
#[derive(Error, Debug)]
pub enum SimError {
    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML or has the wrong shape
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The schema version string is not valid semver
    #[error("invalid schema version '{version}': {source}")]
    InvalidSchemaVersion {
        /// The offending version string
        version: String,
        /// Parse failure
        source: semver::Error,
    },

    /// The configuration targets an incompatible schema
    #[error("configuration schema {found} is not compatible with {expected}")]
    IncompatibleSchema {
        /// Version declared by the file
        found: String,
        /// Version this build understands
        expected: String,
    },

    /// A snapshot could not be serialized
    #[error("failed to serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// An upgrade was requested for a weapon the player does not carry
    #[error("weapon {0:?} is not equipped")]
    WeaponNotEquipped(WeaponKind),

    /// A weapon was granted twice
    #[error("weapon {0:?} is already equipped")]
    WeaponAlreadyEquipped(WeaponKind),

    /// An upgrade was requested for a weapon at its level cap
    #[error("weapon {kind:?} is already at max level {level}")]
    WeaponMaxed {
        /// Weapon type
        kind: WeaponKind,
        /// Level cap
        level: u32,
    },
}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;
