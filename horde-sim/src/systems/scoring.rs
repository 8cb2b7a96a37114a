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
//! Level progression

use crate::ecs::components::{Arsenal, Score};
use crate::ecs::{System, World};
use crate::events::GameEvent;
use crate::upgrades::offer_choices;
use tracing::info;

/// Advance `score` by one level if it reached the next threshold
///
/// The new threshold grows by the old one (at least `min_step`), so each
/// level costs roughly twice the last. Returns the new level.
pub fn try_level_up(score: &mut Score, min_step: u32) -> Option<u32> {
    if score.value < score.next_threshold {
        return None;
    }
    score.prev_threshold = score.next_threshold;
    score.next_threshold += score.prev_threshold.max(min_step);
    score.level += 1;
    Some(score.level)
}

/// Checks the player's score against the next threshold
///
/// At most one level is gained per frame; a surplus carries over to the
/// following frames.
pub struct ScoringSystem;

impl System for ScoringSystem {
    fn run(&mut self, world: &mut World) {
        let min_step = world.config.scoring.min_step;
        let player = world.entities.player_mut();
        let Some(level) = try_level_up(player.get_mut::<Score>(), min_step) else {
            return;
        };
        let arsenal = player.get::<Arsenal>().clone();

        let choices = offer_choices(
            &arsenal,
            world.config.scoring.max_weapon_level,
            world.config.scoring.upgrade_choices,
            &mut world.rng,
        );
        info!(level, ?choices, frame = world.frame(), "level up");
        world.emit(GameEvent::LevelUp { level, choices });
    }

    fn name(&self) -> &str {
        "scoring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::spawn_player;

    #[test]
    fn test_threshold_growth() {
        let mut score = Score::progression(10);
        score.value = 10;
        assert_eq!(try_level_up(&mut score, 100), Some(2));
        assert_eq!(score.prev_threshold, 10);
        assert_eq!(score.next_threshold, 110);

        score.value = 110;
        assert_eq!(try_level_up(&mut score, 100), Some(3));
        assert_eq!(score.prev_threshold, 110);
        assert_eq!(score.next_threshold, 220);
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let mut score = Score::progression(10);
        score.value = 9;
        assert_eq!(try_level_up(&mut score, 100), None);
        assert_eq!(score.level, 1);
    }

    #[test]
    fn test_one_level_per_frame() {
        let mut world = World::default();
        spawn_player(&mut world);
        world.entities.flush();
        world.entities.player_mut().get_mut::<Score>().value = 500;

        ScoringSystem.run(&mut world);
        assert_eq!(world.entities.player().get::<Score>().level, 2);
        ScoringSystem.run(&mut world);
        assert_eq!(world.entities.player().get::<Score>().level, 3);

        let levels: Vec<u32> = world
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelUp { level, choices } => {
                    assert!(!choices.is_empty());
                    Some(*level)
                }
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3]);
    }
}
