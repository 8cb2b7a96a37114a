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
//! The simulation facade
//!
//! [`Game`] owns the [`World`] and the system schedule and exposes the
//! handful of operations a host loop needs: feed input, advance a frame,
//! read back state, apply upgrades.
//!
//! ```
//! use horde_sim::{Game, GameConfig};
//! use horde_sim::ecs::components::Intent;
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.apply_intent(Intent::Right, true);
//! for _ in 0..10 {
//!     game.advance_frame();
//! }
//! assert_eq!(game.frame(), 10);
//! ```

use crate::config::GameConfig;
use crate::ecs::components::{Arsenal, Input, Intent, State};
use crate::ecs::{Entity, EntityManager, Scheduler, World};
use crate::error::SimResult;
use crate::events::GameEvent;
use crate::kinds::{Tag, WeaponKind};
use crate::snapshot::FrameSnapshot;
use crate::spawn::spawn_player;
use crate::systems::default_schedule;
use crate::upgrades;
use tracing::info;

/// A running simulation
pub struct Game {
    world: World,
    scheduler: Scheduler,
}

impl Game {
    /// Validate `config` and build the first level
    pub fn new(config: GameConfig) -> SimResult<Self> {
        config.check_schema()?;
        config.validate()?;
        let mut game = Game {
            world: World::new(config),
            scheduler: default_schedule(),
        };
        game.load_level();
        Ok(game)
    }

    fn load_level(&mut self) {
        self.world.clear();
        spawn_player(&mut self.world);
        self.world.entities.flush();
    }

    /// Run one frame
    ///
    /// Pending spawns and reaps are applied first, then every system runs
    /// once in order and the frame counter advances. If the player died and
    /// `restart_on_death` is set, the level is rebuilt before returning.
    pub fn advance_frame(&mut self) {
        self.world.entities.flush();
        self.scheduler.run_sequential(&mut self.world);
        self.world.tick();

        if self.world.config.restart_on_death && self.player().get::<State>().is_dead() {
            self.restart();
        }
    }

    /// Throw away every entity and start the level over
    ///
    /// The frame counter and the random stream carry on.
    pub fn restart(&mut self) {
        info!(frame = self.world.frame(), "restarting level");
        self.load_level();
        self.world.emit(GameEvent::Restarted);
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.world.frame()
    }

    /// The world, for inspection
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, for direct manipulation by tools and tests
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The entity store
    pub fn entities(&self) -> &EntityManager {
        &self.world.entities
    }

    /// Live entities carrying `tag`
    pub fn entities_by_tag(&self, tag: Tag) -> impl Iterator<Item = &Entity> + '_ {
        self.world.entities.tagged_entities(tag)
    }

    /// The player
    pub fn player(&self) -> &Entity {
        self.world.entities.player()
    }

    /// The player's input record
    pub fn input_mut(&mut self) -> &mut Input {
        self.world.entities.player_mut().get_mut::<Input>()
    }

    /// Record the start or end of an input action
    pub fn apply_intent(&mut self, intent: Intent, pressed: bool) {
        self.input_mut().apply(intent, pressed);
    }

    /// Upgrade one of the player's weapons, returning its new level
    pub fn apply_upgrade(&mut self, kind: WeaponKind) -> SimResult<u32> {
        let max_level = self.world.config.scoring.max_weapon_level;
        let arsenal = self.world.entities.player_mut().get_mut::<Arsenal>();
        let level = upgrades::apply_upgrade(arsenal, kind, max_level)?;
        info!(?kind, level, "weapon upgraded");
        Ok(level)
    }

    /// Equip a new weapon with its base stats
    pub fn grant_weapon(&mut self, kind: WeaponKind) -> SimResult<()> {
        let stats = self.world.config.weapon(kind).clone();
        let arsenal = self.world.entities.player_mut().get_mut::<Arsenal>();
        upgrades::grant_weapon(arsenal, kind, stats)?;
        info!(?kind, "weapon granted");
        Ok(())
    }

    /// Capture the current frame for rendering
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.world.entities, self.world.frame())
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }
}
