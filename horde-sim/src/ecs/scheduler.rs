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
//! Staged system scheduler
//!
//! Systems are grouped into stages that run in ascending order. Within a
//! stage, systems run in the order they were added, so the frame order is
//! fully deterministic.

use crate::ecs::System;
use crate::ecs::World;
use tracing::trace_span;

/// Stage identifier for grouping systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// Pre-defined stages of a simulation frame
pub mod stages {
    use super::StageId;

    /// Expire entities whose lifespan ran out
    pub const LIFESPAN: StageId = StageId(0);

    /// Queue new enemies and attacks
    pub const SPAWN: StageId = StageId(1);

    /// Knockback decay, pursuit steering and attraction
    pub const STEERING: StageId = StageId(2);

    /// Velocity assembly and position integration
    pub const MOVEMENT: StageId = StageId(3);

    /// Overlap resolution and combat
    pub const COLLISION: StageId = StageId(4);

    /// Level progression
    pub const SCORING: StageId = StageId(5);
}

struct ScheduledSystem {
    system: Box<dyn System>,
    stage: StageId,
}

/// Runs systems stage by stage
///
/// # Examples
///
/// ```
/// use horde_sim::ecs::scheduler::{Scheduler, stages};
/// use horde_sim::ecs::{System, World};
///
/// struct MySystem;
/// impl System for MySystem {
///     fn run(&mut self, _world: &mut World) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(MySystem, stages::MOVEMENT);
/// assert_eq!(scheduler.system_count(), 1);
/// ```
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
        }
    }

    /// Add a system to a specific stage
    ///
    /// Systems sharing a stage keep their insertion order.
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.systems.push(ScheduledSystem {
            system: Box::new(system),
            stage,
        });
        // Stable, so insertion order within a stage survives
        self.systems.sort_by_key(|s| s.stage);
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Get the number of stages in use
    pub fn stage_count(&self) -> usize {
        self.systems
            .iter()
            .map(|s| s.stage.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// System names in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    /// Execute all systems in stage order
    pub fn run_sequential(&mut self, world: &mut World) {
        for scheduled in &mut self.systems {
            let _span = trace_span!("system", name = scheduled.system.name()).entered();
            scheduled.system.run(world);
        }
    }

    /// Clear all systems from the scheduler
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
