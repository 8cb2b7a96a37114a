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
//! Headless run of the simulation
//!
//! Plays a scripted minute: the hero circles the arena with auto-attack on
//! and takes the first upgrade offered at each level. Pass a TOML config
//! path as the first argument to override the defaults.
//!
//! ```text
//! RUST_LOG=horde_sim=debug cargo run --example headless -- config/horde.toml
//! ```

use horde_sim::ecs::components::Intent;
use horde_sim::events::GameEvent;
use horde_sim::kinds::Tag;
use horde_sim::{Game, GameConfig, SimResult};
use tracing_subscriber::EnvFilter;

const FRAMES: u64 = 3600;

/// Direction held for each quarter of a lap
const LAP: [Intent; 4] = [Intent::Right, Intent::Down, Intent::Left, Intent::Up];

fn main() -> SimResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    println!("Horde Sim - Headless Run");
    println!("========================\n");

    let mut game = Game::new(config)?;
    game.apply_intent(Intent::ToggleAutoAttack, true);

    let mut kills = 0u32;
    let mut deaths = 0u32;
    let mut held = None;

    for frame in 0..FRAMES {
        let leg = LAP[(frame / 90 % 4) as usize];
        if held != Some(leg) {
            if let Some(previous) = held {
                game.apply_intent(previous, false);
            }
            game.apply_intent(leg, true);
            held = Some(leg);
        }

        game.advance_frame();

        for event in game.drain_events() {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::PlayerDied { frame } => {
                    deaths += 1;
                    println!("  frame {frame:>5}: hero fell");
                }
                GameEvent::Restarted => {
                    // The fresh hero starts with auto-attack off again
                    game.apply_intent(Intent::ToggleAutoAttack, true);
                    held = None;
                }
                GameEvent::LevelUp { level, choices } => {
                    if let Some(&pick) = choices.first() {
                        let weapon_level = game.apply_upgrade(pick)?;
                        println!("  level {level}: {pick:?} -> level {weapon_level}");
                    }
                }
                _ => {}
            }
        }

        if game.frame() % 600 == 0 {
            println!(
                "frame {:>5}: {} enemies, {} attacks, {} gems",
                game.frame(),
                game.entities().tagged(Tag::Enemy).len(),
                game.entities().tagged(Tag::PlayerAttack).len(),
                game.entities().tagged(Tag::Gem).len(),
            );
        }
    }

    let snapshot = game.snapshot();
    println!("\nSummary");
    println!("-------");
    println!("  kills:  {kills}");
    println!("  deaths: {deaths}");
    println!(
        "  hero:   level {}, score {}, health {}/{}",
        snapshot.hud.level, snapshot.hud.score, snapshot.hud.health, snapshot.hud.max_health
    );
    println!("  entities in last frame: {}", snapshot.entities.len());

    if std::env::var_os("HORDE_DUMP").is_some() {
        println!("\n{}", snapshot.to_json_pretty()?);
    }
    Ok(())
}
