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
//! Per-frame gameplay systems
//!
//! [`default_schedule`] wires them in frame order:
//!
//! 1. lifespan expiry
//! 2. enemy spawning, then player weapon fire
//! 3. knockback decay, pursuit steering, attraction
//! 4. movement integration
//! 5. collision and combat
//! 6. level progression

mod attacks;
pub mod combat;
mod collision;
mod director;
pub mod knockback;
mod lifespan;
pub mod movement;
mod scoring;
pub mod steering;

pub use attacks::PlayerAttackSystem;
pub use collision::CollisionSystem;
pub use director::{Director, DirectorSystem};
pub use knockback::KnockbackSystem;
pub use lifespan::LifespanSystem;
pub use movement::MovementSystem;
pub use scoring::{try_level_up, ScoringSystem};
pub use steering::{AttractionSystem, SteeringSystem};

use crate::ecs::{stages, Scheduler};

/// Scheduler holding every gameplay system in frame order
pub fn default_schedule() -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler.add_system(LifespanSystem, stages::LIFESPAN);
    scheduler.add_system(DirectorSystem, stages::SPAWN);
    scheduler.add_system(PlayerAttackSystem, stages::SPAWN);
    scheduler.add_system(KnockbackSystem, stages::STEERING);
    scheduler.add_system(SteeringSystem, stages::STEERING);
    scheduler.add_system(AttractionSystem, stages::STEERING);
    scheduler.add_system(MovementSystem, stages::MOVEMENT);
    scheduler.add_system(CollisionSystem, stages::COLLISION);
    scheduler.add_system(ScoringSystem, stages::SCORING);
    scheduler
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_order() {
        let scheduler = default_schedule();
        assert_eq!(
            scheduler.system_names(),
            vec![
                "lifespan",
                "director",
                "player_attacks",
                "knockback",
                "steering",
                "attraction",
                "movement",
                "collision",
                "scoring",
            ]
        );
        assert_eq!(scheduler.stage_count(), 6);
    }
}
