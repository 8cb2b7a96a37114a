//! Entity Component System core
//!
//! This module provides the ECS pieces the simulation is built on:
//! - Entities with a closed set of optional component slots
//! - The entity manager with deferred spawn and reap
//! - The world container, system trait and staged scheduler

mod entity;
pub mod component;
pub mod components;
mod manager;
mod system;
pub mod scheduler;
mod world;

pub use component::Component;
pub use entity::{Entity, EntityId};
pub use manager::EntityManager;
pub use scheduler::{stages, Scheduler, StageId};
pub use system::System;
pub use world::World;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Health;
    use crate::kinds::Kind;

    #[test]
    fn test_world_creation() {
        let world = World::default();
        assert_eq!(world.entities.len(), 0);
    }

    #[test]
    fn test_entity_creation() {
        let mut world = World::default();
        let id = world.entities.create_entity(Kind::Hero).id();
        world.entities.get_mut(id).unwrap().add(Health::new(10, 0));
        world.entities.flush();
        assert_eq!(world.entities.len(), 1);
        assert!(world.entities.is_live(id));
        assert_eq!(world.player_id(), id);
    }
}
