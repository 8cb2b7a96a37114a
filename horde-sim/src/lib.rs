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
//! # Horde Sim
//!
//! Frame-stepped simulation core for a top-down horde survival game: a
//! small ECS with deferred spawn/reap, plus the gameplay systems that move,
//! steer, collide and score entities sixty times a second.
//!
//! ## Features
//!
//! - **ECS Architecture**: entities with a fixed set of optional component slots
//! - **Deferred Lifecycle**: spawns and destroys apply at the start of the next frame
//! - **Deterministic Frames**: staged systems, integer frame timing, seeded randomness
//! - **Data-Driven**: enemy and weapon tables loaded from TOML
//!
//! ## Example
//!
//! ```rust
//! use horde_sim::{Game, GameConfig};
//! use horde_sim::kinds::Tag;
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! for _ in 0..120 {
//!     game.advance_frame();
//! }
//! assert!(game.entities_by_tag(Tag::Enemy).count() > 0);
//! let json = game.snapshot().to_json().unwrap();
//! assert!(json.contains("chainBot"));
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Gameplay configuration
pub mod config;

/// Error types
pub mod error;

/// Gameplay events for collaborators
pub mod events;

/// The simulation facade
pub mod game;

/// Vector math
pub mod geometry;

/// Entity categories and subtypes
pub mod kinds;

/// Spatial queries
pub mod query;

/// Render snapshots
pub mod snapshot;

/// Entity factories
pub mod spawn;

/// Per-frame gameplay systems
pub mod systems;

/// Weapon upgrade progression
pub mod upgrades;

pub use config::GameConfig;
pub use ecs::{Entity, EntityId, EntityManager, World};
pub use error::{SimError, SimResult};
pub use game::Game;
