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
//! Component slot machinery
//!
//! Entities carry a closed set of component slots rather than an open,
//! dynamically registered storage. Each slot holds a value plus a presence
//! flag; absent slots keep their default value so reads never fail.

use crate::ecs::components::{
    Arsenal, Attractor, BoundingBox, DamageText, Damage, Follow, Health, Input, Knockback,
    KnockbackSpec, Lifespan, MoveWithVelocityOf, Score, State, Transform,
};

/// A component type that owns one slot in every entity
///
/// Implemented by the `component_set!` declaration below for each
/// gameplay record; there is no runtime registration.
pub trait Component: Default + 'static {
    /// The slot holding this component
    fn slot(set: &ComponentSet) -> &Slot<Self>;

    /// The slot holding this component, mutably
    fn slot_mut(set: &mut ComponentSet) -> &mut Slot<Self>;
}

/// Storage for one component plus its presence flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot<T> {
    present: bool,
    value: T,
}

impl<T: Default> Slot<T> {
    /// Store `value` and mark the slot present
    pub fn insert(&mut self, value: T) -> &mut T {
        self.value = value;
        self.present = true;
        &mut self.value
    }

    /// Reset to the default value and mark the slot absent
    pub fn clear(&mut self) {
        self.value = T::default();
        self.present = false;
    }

    /// Whether a value has been added
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The stored value, default when absent
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The stored value mutably, default when absent
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// The stored value only when present
    pub fn get(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }
}

macro_rules! component_set {
    ($($field:ident: $ty:ty),* $(,)?) => {
        /// One slot per gameplay component
        #[derive(Debug, Clone, Default)]
        pub struct ComponentSet {
            $($field: Slot<$ty>,)*
        }

        impl ComponentSet {
            /// Number of components currently present
            pub fn present_count(&self) -> usize {
                0 $(+ usize::from(self.$field.is_present()))*
            }
        }

        $(
            impl Component for $ty {
                fn slot(set: &ComponentSet) -> &Slot<Self> {
                    &set.$field
                }

                fn slot_mut(set: &mut ComponentSet) -> &mut Slot<Self> {
                    &mut set.$field
                }
            }
        )*
    };
}

component_set! {
    transform: Transform,
    bounding_box: BoundingBox,
    health: Health,
    damage: Damage,
    input: Input,
    state: State,
    score: Score,
    knockback: Knockback,
    knockback_spec: KnockbackSpec,
    attractor: Attractor,
    follow: Follow,
    lifespan: Lifespan,
    move_with: MoveWithVelocityOf,
    arsenal: Arsenal,
    damage_text: DamageText,
}
