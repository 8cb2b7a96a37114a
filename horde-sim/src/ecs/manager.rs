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
//! Entity ownership and lifecycle
//!
//! The [`EntityManager`] owns every entity. New entities are parked in a
//! pending buffer and only join the live set (and the tag index) when
//! [`EntityManager::flush`] runs at the start of the next frame. Destroyed
//! entities stay readable but inactive until that same flush reaps them.
//! This keeps the live views stable while systems iterate.

use crate::ecs::{Entity, EntityId};
use crate::kinds::{Kind, Tag};
use std::collections::HashMap;
use tracing::trace;

/// Owner of all entities with a deferred add/remove lifecycle
#[derive(Debug, Default)]
pub struct EntityManager {
    entities: Vec<Entity>,
    slots: HashMap<EntityId, usize>,
    pending: Vec<Entity>,
    by_tag: HashMap<Tag, Vec<EntityId>>,
    next_id: u64,
}

impl EntityManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity of the given kind
    ///
    /// The entity is filed under `kind.tag()` and becomes visible to
    /// [`entities`](Self::entities) and [`tagged`](Self::tagged) after the
    /// next [`flush`](Self::flush). The returned handle can be used right
    /// away to attach components.
    pub fn create_entity(&mut self, kind: Kind) -> &mut Entity {
        self.next_id += 1;
        let id = EntityId::new(self.next_id);
        trace!(%id, ?kind, "entity queued");
        self.pending.push(Entity::new(id, kind.tag(), kind));
        let last = self.pending.len() - 1;
        &mut self.pending[last]
    }

    /// Apply pending adds and reap destroyed entities
    ///
    /// Pending entities are appended to the live set and their tag list in
    /// creation order. Afterwards every inactive entity is removed from the
    /// live set and from all tag lists.
    pub fn flush(&mut self) {
        let added = self.pending.len();
        for entity in self.pending.drain(..) {
            self.by_tag.entry(entity.tag()).or_default().push(entity.id());
            self.entities.push(entity);
        }

        let before = self.entities.len();
        self.entities.retain(Entity::is_active);
        let removed = before - self.entities.len();

        if added == 0 && removed == 0 {
            return;
        }

        self.slots.clear();
        for (index, entity) in self.entities.iter().enumerate() {
            self.slots.insert(entity.id(), index);
        }

        if removed > 0 {
            let slots = &self.slots;
            for list in self.by_tag.values_mut() {
                list.retain(|id| slots.contains_key(id));
            }
        }

        trace!(added, removed, live = self.entities.len(), "entity manager flushed");
    }

    /// All live entities in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// All live entities, mutably
    ///
    /// Only component data and the active flag can change through this view;
    /// the set itself is fixed until the next flush.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Ids of live entities carrying `tag`, in insertion order
    ///
    /// A tag that has never been used yields an empty slice.
    pub fn tagged(&self, tag: Tag) -> &[EntityId] {
        self.by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Live entities carrying `tag`
    pub fn tagged_entities(&self, tag: Tag) -> impl Iterator<Item = &Entity> + '_ {
        self.tagged(tag).iter().filter_map(move |id| self.get(*id))
    }

    /// Look up an entity, live or still pending
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        match self.slots.get(&id) {
            Some(&index) => self.entities.get(index),
            None => self.pending.iter().find(|e| e.id() == id),
        }
    }

    /// Look up an entity mutably, live or still pending
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.slots.get(&id) {
            Some(&index) => self.entities.get_mut(index),
            None => self.pending.iter_mut().find(|e| e.id() == id),
        }
    }

    /// Borrow two distinct live entities mutably at once
    ///
    /// Returns `None` if the ids are equal or either one is not live.
    pub fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let ia = *self.slots.get(&a)?;
        let ib = *self.slots.get(&b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (left, right) = self.entities.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.entities.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    /// Whether `id` names a live entity that has not been destroyed
    pub fn is_live(&self, id: EntityId) -> bool {
        self.slots
            .get(&id)
            .and_then(|&index| self.entities.get(index))
            .map_or(false, Entity::is_active)
    }

    /// Soft-destroy an entity; returns false if it is unknown
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.destroy();
                true
            }
            None => false,
        }
    }

    /// Id of the player
    ///
    /// # Panics
    ///
    /// Panics unless exactly one live entity is tagged as the player.
    pub fn player_id(&self) -> EntityId {
        let players = self.tagged(Tag::Player);
        assert_eq!(
            players.len(),
            1,
            "expected exactly one player entity, found {}",
            players.len()
        );
        players[0]
    }

    /// The player entity, if the single-player invariant holds
    pub fn try_player(&self) -> Option<&Entity> {
        match self.tagged(Tag::Player) {
            [id] => self.get(*id),
            _ => None,
        }
    }

    /// The player entity
    ///
    /// # Panics
    ///
    /// Panics unless exactly one live entity is tagged as the player.
    pub fn player(&self) -> &Entity {
        let id = self.player_id();
        &self.entities[self.slots[&id]]
    }

    /// The player entity, mutably
    ///
    /// # Panics
    ///
    /// Panics unless exactly one live entity is tagged as the player.
    pub fn player_mut(&mut self) -> &mut Entity {
        let id = self.player_id();
        let index = self.slots[&id];
        &mut self.entities[index]
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether there are no live entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities waiting for the next flush
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop every entity, live and pending
    ///
    /// Ids keep counting so handles from before the clear never alias new
    /// entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.slots.clear();
        self.pending.clear();
        self.by_tag.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Damage;
    use crate::kinds::{EnemyKind, WeaponKind};

    const CHAIN_BOT: Kind = Kind::Enemy(EnemyKind::ChainBot);

    #[test]
    fn test_ids_are_monotonic() {
        let mut manager = EntityManager::new();
        let a = manager.create_entity(CHAIN_BOT).id();
        let b = manager.create_entity(CHAIN_BOT).id();
        assert!(b > a);
        assert_ne!(a, EntityId::default());
    }

    #[test]
    fn test_pending_invisible_until_flush() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(CHAIN_BOT).id();
        assert!(manager.is_empty());
        assert!(manager.tagged(Tag::Enemy).is_empty());
        assert!(!manager.is_live(id));
        // The handle is still reachable for setup
        assert!(manager.get(id).is_some());

        manager.flush();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.tagged(Tag::Enemy), &[id]);
        assert!(manager.is_live(id));
    }

    #[test]
    fn test_components_attached_before_flush_survive() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(CHAIN_BOT).id();
        manager.get_mut(id).unwrap().add(Damage::new(4));
        manager.flush();
        assert_eq!(manager.get(id).unwrap().get::<Damage>().amount, 4);
    }

    #[test]
    fn test_destroy_is_deferred() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(CHAIN_BOT).id();
        manager.flush();

        assert!(manager.destroy(id));
        assert_eq!(manager.tagged(Tag::Enemy), &[id]);
        assert!(!manager.is_live(id));
        assert!(manager.get(id).is_some());

        manager.flush();
        assert!(manager.tagged(Tag::Enemy).is_empty());
        assert!(manager.get(id).is_none());
    }

    #[test]
    fn test_destroyed_while_pending_never_appears() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(CHAIN_BOT).id();
        manager.destroy(id);
        manager.flush();
        assert!(manager.is_empty());
        assert!(manager.tagged(Tag::Enemy).is_empty());
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let manager = EntityManager::new();
        assert!(manager.tagged(Tag::DisappearingText).is_empty());
    }

    #[test]
    fn test_flush_preserves_order() {
        let mut manager = EntityManager::new();
        let ids: Vec<_> = (0..5).map(|_| manager.create_entity(CHAIN_BOT).id()).collect();
        manager.flush();
        manager.destroy(ids[1]);
        manager.destroy(ids[3]);
        manager.flush();
        assert_eq!(manager.tagged(Tag::Enemy), &[ids[0], ids[2], ids[4]]);
        let live: Vec<_> = manager.entities().iter().map(Entity::id).collect();
        assert_eq!(live, vec![ids[0], ids[2], ids[4]]);
        assert_eq!(manager.get(ids[4]).unwrap().id(), ids[4]);
    }

    #[test]
    fn test_pair_borrow() {
        let mut manager = EntityManager::new();
        let a = manager.create_entity(CHAIN_BOT).id();
        let b = manager.create_entity(Kind::Attack(WeaponKind::Slash)).id();
        manager.flush();

        let (ea, eb) = manager.get_pair_mut(b, a).unwrap();
        assert_eq!(ea.id(), b);
        assert_eq!(eb.id(), a);
        assert!(manager.get_pair_mut(a, a).is_none());
    }

    #[test]
    #[should_panic(expected = "exactly one player")]
    fn test_missing_player_panics() {
        let manager = EntityManager::new();
        manager.player_id();
    }

    #[test]
    fn test_clear_keeps_counting() {
        let mut manager = EntityManager::new();
        let old = manager.create_entity(Kind::Hero).id();
        manager.flush();
        manager.clear();
        assert!(manager.is_empty());
        let new = manager.create_entity(Kind::Hero).id();
        assert!(new > old);
    }
}
