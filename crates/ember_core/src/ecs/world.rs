// world.rs - Entity table plus component stores
//
// The world owns every entity record and every component store. Component
// data lives in a direct-mapped dense array per type: entity `i` keeps its
// `T` at slot `i` of `T`'s store, and the entity's mask says whether that
// slot is live.

use crate::ecs::slots::{SlotError, SlotTable};
use crate::ecs::storage::{ComponentStores, StoreError};
use crate::ecs::{
    Component, ComponentTypeId, EntityId, EntityMut, EntityRef, RegistryConfig,
};
use thiserror::Error;

/// Errors raised by entity and component operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("entity capacity of {capacity} reached")]
    CapacityExceeded { capacity: usize },

    #[error("component type limit of {limit} reached while registering `{component}`")]
    ComponentTypeLimitExceeded {
        component: &'static str,
        limit: usize,
    },

    #[error("entity {id} is not alive")]
    InvalidEntity { id: EntityId },

    #[error("entity {id} already has a `{component}` component")]
    DuplicateComponent {
        id: EntityId,
        component: &'static str,
    },

    #[error("entity {id} has no `{component}` component")]
    ComponentNotPresent {
        id: EntityId,
        component: &'static str,
    },

    /// A registered type without a matching store; indicates a bug in the world.
    #[error("component store for `{component}` is missing")]
    StoreMissing { component: &'static str },

    #[error("no entity is named '{name}'")]
    NameNotFound { name: String },
}

impl From<SlotError> for WorldError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Full { capacity } => WorldError::CapacityExceeded { capacity },
            SlotError::Inactive(id) => WorldError::InvalidEntity { id },
            SlotError::UnknownName(name) => WorldError::NameNotFound { name },
        }
    }
}

/// The entity table and all component stores.
pub struct World {
    config: RegistryConfig,
    slots: SlotTable,
    stores: ComponentStores,
}

impl World {
    /// Create an empty world with the compile-time capacities.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty world with custom (clamped) capacities.
    pub fn with_config(config: RegistryConfig) -> Self {
        let config = config.clamped();
        Self {
            config,
            slots: SlotTable::new(config.max_entities),
            stores: ComponentStores::new(config.max_component_types, config.max_entities),
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Create an entity, optionally named.
    ///
    /// Unnamed entities are called `"Unnamed Entity. EID = <id>"`.
    pub fn create_entity(&mut self, name: Option<&str>) -> Result<EntityId, WorldError> {
        match self.slots.create(name) {
            Ok(id) => {
                tracing::trace!(entity = %id, "created entity");
                Ok(id)
            }
            Err(err) => {
                let err = WorldError::from(err);
                tracing::warn!(error = %err, "entity creation failed");
                Err(err)
            }
        }
    }

    /// Create an entity and return a mutable handle to it.
    pub fn spawn(&mut self, name: Option<&str>) -> Result<EntityMut<'_>, WorldError> {
        let id = self.create_entity(name)?;
        EntityMut::new(self, id)
    }

    /// Destroy an entity. Its slot is reused by a later `create_entity`.
    ///
    /// Component storage is not freed; the cleared mask makes the old data
    /// unreachable until the slot's next owner overwrites it.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), WorldError> {
        self.slots.destroy(id)?;
        tracing::trace!(entity = %id, "destroyed entity");
        Ok(())
    }

    /// Destroy the entity called `name`, returning the id it had.
    pub fn destroy_entity_by_name(&mut self, name: &str) -> Result<EntityId, WorldError> {
        let id = self.entity_by_name(name)?;
        self.destroy_entity(id)?;
        Ok(id)
    }

    pub fn entity_by_name(&self, name: &str) -> Result<EntityId, WorldError> {
        Ok(self.slots.lookup_by_name(name)?)
    }

    pub fn entity_name(&self, id: EntityId) -> Option<&str> {
        self.slots.record(id).map(|r| r.name.as_str())
    }

    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots.is_alive(id)
    }

    /// Read-only handle; fails with `InvalidEntity` if `id` is not alive.
    pub fn entity(&self, id: EntityId) -> Result<EntityRef<'_>, WorldError> {
        EntityRef::new(self, id)
    }

    /// Mutable handle; fails with `InvalidEntity` if `id` is not alive.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<EntityMut<'_>, WorldError> {
        EntityMut::new(self, id)
    }

    /// Live entity ids in ascending slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.active().map(|r| r.id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.slots.len()
    }

    pub fn entity_capacity(&self) -> usize {
        self.slots.capacity()
    }

    // ------------------------------------------------------------------
    // Component types
    // ------------------------------------------------------------------

    /// Return `T`'s type id, creating its store on first use.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentTypeId, WorldError> {
        self.stores.get_or_create::<T>().map_err(|err| match err {
            StoreError::LimitReached { limit } => {
                tracing::warn!(component = T::type_name(), limit, "component type limit reached");
                WorldError::ComponentTypeLimitExceeded {
                    component: T::type_name(),
                    limit,
                }
            }
        })
    }

    /// `T`'s type id if it has been registered.
    pub fn component_type_id<T: Component>(&self) -> Option<ComponentTypeId> {
        self.stores.id_of::<T>()
    }

    /// Name of the component type registered under `id`.
    pub fn component_type_name(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.stores.name_of(id)
    }

    pub fn registered_component_count(&self) -> usize {
        self.stores.len()
    }

    /// Detach `T` from every entity, drop its store and recycle its id.
    ///
    /// Returns `false` if `T` was never registered.
    pub fn unregister_component<T: Component>(&mut self) -> bool {
        let Some(type_id) = self.stores.release::<T>() else {
            return false;
        };
        for record in self.slots.used_mut() {
            record.mask.clear(type_id);
        }
        true
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach `value` to `id`.
    pub fn add_component<T: Component>(&mut self, id: EntityId, value: T) -> Result<(), WorldError> {
        if !self.is_alive(id) {
            return Err(WorldError::InvalidEntity { id });
        }
        let type_id = self.register_component::<T>()?;
        let record = self
            .slots
            .record_mut(id)
            .ok_or(WorldError::InvalidEntity { id })?;
        if record.mask.has(type_id) {
            return Err(WorldError::DuplicateComponent {
                id,
                component: T::type_name(),
            });
        }

        let Some(store) = self.stores.typed_mut::<T>(type_id) else {
            debug_assert!(false, "registered component `{}` has no store", T::type_name());
            return Err(WorldError::StoreMissing {
                component: T::type_name(),
            });
        };
        store.write(id.index(), value);
        record.mask.set(type_id);
        Ok(())
    }

    /// Whether `id` currently has a `T`.
    pub fn has_component<T: Component>(&self, id: EntityId) -> Result<bool, WorldError> {
        let record = self.slots.record(id).ok_or(WorldError::InvalidEntity { id })?;
        Ok(self
            .stores
            .id_of::<T>()
            .is_some_and(|type_id| record.mask.has(type_id)))
    }

    /// The `T` attached to `id`, or `None` if it has none.
    ///
    /// Does not register `T`: an unregistered type cannot be attached.
    pub fn get_component<T: Component>(&self, id: EntityId) -> Result<Option<&T>, WorldError> {
        let record = self.slots.record(id).ok_or(WorldError::InvalidEntity { id })?;
        let Some(type_id) = self.stores.id_of::<T>() else {
            return Ok(None);
        };
        if !record.mask.has(type_id) {
            return Ok(None);
        }
        Ok(self
            .stores
            .typed::<T>(type_id)
            .and_then(|store| store.get(id.index())))
    }

    pub fn get_component_mut<T: Component>(
        &mut self,
        id: EntityId,
    ) -> Result<Option<&mut T>, WorldError> {
        let record = self.slots.record(id).ok_or(WorldError::InvalidEntity { id })?;
        let Some(type_id) = self.stores.id_of::<T>() else {
            return Ok(None);
        };
        if !record.mask.has(type_id) {
            return Ok(None);
        }
        Ok(self
            .stores
            .typed_mut::<T>(type_id)
            .and_then(|store| store.get_mut(id.index())))
    }

    /// Detach the `T` from `id`. The slot keeps its old value until overwritten.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> Result<(), WorldError> {
        let record = self
            .slots
            .record_mut(id)
            .ok_or(WorldError::InvalidEntity { id })?;
        match self.stores.id_of::<T>() {
            Some(type_id) if record.mask.has(type_id) => {
                record.mask.clear(type_id);
                Ok(())
            }
            _ => Err(WorldError::ComponentNotPresent {
                id,
                component: T::type_name(),
            }),
        }
    }

    /// Visit every live entity that has a `T`, in ascending slot order.
    ///
    /// Registers `T` if needed. The world stays mutably borrowed for the
    /// whole walk, so entities cannot be created or destroyed from inside
    /// the visitor.
    pub fn each_component<T, F>(&mut self, mut visit: F) -> Result<(), WorldError>
    where
        T: Component,
        F: FnMut(EntityId, &mut T),
    {
        let type_id = self.register_component::<T>()?;
        let Some(store) = self.stores.typed_mut::<T>(type_id) else {
            return Ok(());
        };
        for record in self.slots.active() {
            if !record.mask.has(type_id) {
                continue;
            }
            if let Some(component) = store.get_mut(record.id.index()) {
                visit(record.id, component);
            }
        }
        Ok(())
    }

    /// Shared iteration over every live `(EntityId, &T)` in ascending slot order.
    ///
    /// Yields nothing if `T` was never registered.
    pub fn iter_component<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        let type_id = self.stores.id_of::<T>();
        let store = type_id.and_then(|type_id| self.stores.typed::<T>(type_id));
        self.slots
            .active()
            .filter(move |record| type_id.is_some_and(|type_id| record.mask.has(type_id)))
            .filter_map(move |record| {
                store
                    .and_then(|store| store.get(record.id.index()))
                    .map(|component| (record.id, component))
            })
    }

    /// Number of live entities that have a `T`.
    pub fn count_component<T: Component>(&self) -> usize {
        self.iter_component::<T>().count()
    }

    /// Remove every entity and every component store.
    pub fn reset(&mut self) {
        self.slots.reset();
        self.stores.reset();
        tracing::debug!("world reset");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
