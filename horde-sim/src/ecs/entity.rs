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
//! Entities
//!
//! An entity is a stable id, a category tag, a concrete kind, an active flag
//! and a fixed record of optional components. Entities are owned by the
//! [`EntityManager`](crate::ecs::EntityManager); everything else refers to
//! them by [`EntityId`].

use crate::ecs::component::{Component, ComponentSet};
use crate::kinds::{Kind, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entity
///
/// Ids are handed out monotonically starting at 1 and never reused, so the
/// default id (0) never names a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new EntityId from a raw u64 value
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A simulated game object
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: Tag,
    kind: Kind,
    active: bool,
    components: ComponentSet,
}

impl Entity {
    pub(crate) fn new(id: EntityId, tag: Tag, kind: Kind) -> Self {
        Entity {
            id,
            tag,
            kind,
            active: true,
            components: ComponentSet::default(),
        }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Category used by the tag index
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Concrete subtype
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// False once destroyed; the entity is reaped at the next flush
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the entity for removal at the next flush
    pub fn destroy(&mut self) {
        self.active = false;
    }

    /// Attach (or overwrite) a component and return it for further tweaks
    pub fn add<T: Component>(&mut self, component: T) -> &mut T {
        T::slot_mut(&mut self.components).insert(component)
    }

    /// Read a component; absent components read as their default
    pub fn get<T: Component>(&self) -> &T {
        T::slot(&self.components).value()
    }

    /// Mutate a component; absent components expose their default storage
    pub fn get_mut<T: Component>(&mut self) -> &mut T {
        T::slot_mut(&mut self.components).value_mut()
    }

    /// Read a component only if it has been added
    pub fn try_get<T: Component>(&self) -> Option<&T> {
        T::slot(&self.components).get()
    }

    /// Whether a component has been added
    pub fn has<T: Component>(&self) -> bool {
        T::slot(&self.components).is_present()
    }

    /// Detach a component, resetting it to its default
    pub fn remove<T: Component>(&mut self) {
        T::slot_mut(&mut self.components).clear();
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.present_count()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, {})", self.id.0, self.tag)
    }
}
