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
//! World management
//!
//! The World is the central container a frame operates on: the entity
//! store, the spawn director, the frame clock, the seeded random source and
//! the event queue. Systems receive it mutably, one at a time.

use crate::config::GameConfig;
use crate::ecs::{EntityId, EntityManager};
use crate::events::GameEvent;
use crate::systems::Director;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The simulation state shared by all systems
pub struct World {
    /// Entity store
    pub entities: EntityManager,
    /// Enemy spawn timers
    pub director: Director,
    /// Gameplay constants
    pub config: GameConfig,
    /// Seeded random source; all randomness goes through here
    pub rng: ChaCha8Rng,
    frame: u64,
    events: Vec<GameEvent>,
}

impl World {
    /// Create an empty world at frame 0
    pub fn new(config: GameConfig) -> Self {
        World {
            entities: EntityManager::new(),
            director: Director::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Current frame number
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn tick(&mut self) {
        self.frame += 1;
    }

    /// Id of the player
    ///
    /// # Panics
    ///
    /// Panics unless exactly one live entity is tagged as the player.
    pub fn player_id(&self) -> EntityId {
        self.entities.player_id()
    }

    /// Queue an event for collaborators
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every entity and restart the director's timers from the current
    /// frame, keeping clock and rng
    pub fn clear(&mut self) {
        self.entities.clear();
        self.director.reset(self.frame);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::Kind;

    #[test]
    fn test_world_creation() {
        let world = World::default();
        assert_eq!(world.frame(), 0);
        assert!(world.entities.is_empty());
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_event_drain() {
        let mut world = World::default();
        world.emit(GameEvent::Restarted);
        assert_eq!(world.drain_events(), vec![GameEvent::Restarted]);
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_clear_keeps_clock() {
        let mut world = World::default();
        world.entities.create_entity(Kind::Hero);
        world.entities.flush();
        world.tick();
        world.clear();
        assert_eq!(world.frame(), 1);
        assert!(world.entities.is_empty());
    }
}
