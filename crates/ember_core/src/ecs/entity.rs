//! Entity ids and validated entity handles
//!
//! An [`EntityId`] is the slot index of an entity. Slots are reused, so an id
//! cached across a destroy/create pair names whatever entity occupies the
//! slot now. [`EntityRef`] and [`EntityMut`] borrow the world and can only be
//! constructed for a live entity, so they stay valid for their whole lifetime.

use crate::ecs::{Component, World, WorldError};
use std::fmt;

/// Entity handle (slot index)
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Slot index in the entity table and in every component store.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of a live entity.
#[derive(Clone, Copy)]
pub struct EntityRef<'w> {
    world: &'w World,
    id: EntityId,
}

impl<'w> EntityRef<'w> {
    pub(crate) fn new(world: &'w World, id: EntityId) -> Result<Self, WorldError> {
        if !world.is_alive(id) {
            return Err(WorldError::InvalidEntity { id });
        }
        Ok(Self { world, id })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &'w str {
        self.world.entity_name(self.id).unwrap_or_default()
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.world.has_component::<T>(self.id).unwrap_or(false)
    }

    pub fn get_component<T: Component>(&self) -> Option<&'w T> {
        self.world.get_component::<T>(self.id).ok().flatten()
    }
}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Mutable view of a live entity: add, get and remove its components.
pub struct EntityMut<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl<'w> EntityMut<'w> {
    pub(crate) fn new(world: &'w mut World, id: EntityId) -> Result<Self, WorldError> {
        if !world.is_alive(id) {
            return Err(WorldError::InvalidEntity { id });
        }
        Ok(Self { world, id })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.world.entity_name(self.id).unwrap_or_default()
    }

    /// Attach `value`; fails with `DuplicateComponent` if one is already attached.
    pub fn add_component<T: Component>(&mut self, value: T) -> Result<&mut Self, WorldError> {
        self.world.add_component(self.id, value)?;
        Ok(self)
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.world.has_component::<T>(self.id).unwrap_or(false)
    }

    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.world.get_component::<T>(self.id).ok().flatten()
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_component_mut::<T>(self.id).ok().flatten()
    }

    /// Detach the `T` component; fails with `ComponentNotPresent` if absent.
    pub fn remove_component<T: Component>(&mut self) -> Result<&mut Self, WorldError> {
        self.world.remove_component::<T>(self.id)?;
        Ok(self)
    }

    /// Downgrade to a read-only handle.
    pub fn as_entity_ref(&self) -> EntityRef<'_> {
        EntityRef {
            world: &*self.world,
            id: self.id,
        }
    }
}

impl fmt::Debug for EntityMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMut")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
