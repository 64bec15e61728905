// storage.rs - Type-erased, direct-mapped component stores
//
// Each registered component type owns one `DenseStore<T>` with a slot per
// entity index. Slots are never compacted: an entity's component always
// lives at the entity's own index.

use crate::ecs::{Component, ComponentTypeId};
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Dense array of optional components indexed by entity slot.
pub struct DenseStore<T> {
    slots: Box<[Option<T>]>,
}

impl<T> DenseStore<T> {
    /// Allocate a store with one empty slot per entity.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrite the slot at `index`, dropping whatever was left there.
    #[inline]
    pub fn write(&mut self, index: usize, value: T) {
        self.slots[index] = Some(value);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }
}

/// Capability interface over a `DenseStore<T>` of unknown `T`.
pub trait ErasedStore {
    fn component_name(&self) -> &'static str;
    fn capacity(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct TypedStore<T: Component> {
    dense: DenseStore<T>,
}

impl<T: Component> ErasedStore for TypedStore<T> {
    fn component_name(&self) -> &'static str {
        T::type_name()
    }

    fn capacity(&self) -> usize {
        self.dense.capacity()
    }

    fn as_any(&self) -> &dyn Any {
        &self.dense
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.dense
    }
}

/// Reasons a store could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Every component type id is in use.
    LimitReached { limit: usize },
}

/// Component type table: `TypeId` lookup, id allocation and the stores.
pub struct ComponentStores {
    entries: Vec<Option<Box<dyn ErasedStore>>>,
    by_type: HashMap<TypeId, ComponentTypeId>,
    free_ids: BTreeSet<ComponentTypeId>,
    cursor: usize,
    limit: usize,
    store_capacity: usize,
}

impl ComponentStores {
    /// `limit` distinct types, each store sized to `store_capacity` entities.
    pub fn new(limit: usize, store_capacity: usize) -> Self {
        Self {
            entries: std::iter::repeat_with(|| None).take(limit).collect(),
            by_type: HashMap::new(),
            free_ids: BTreeSet::new(),
            cursor: 0,
            limit,
            store_capacity,
        }
    }

    /// Id already assigned to `T`, if any.
    #[inline]
    pub fn id_of<T: Component>(&self) -> Option<ComponentTypeId> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Return the id for `T`, creating its store on first use.
    ///
    /// Reclaimed ids are handed out lowest-first before the cursor advances.
    pub fn get_or_create<T: Component>(&mut self) -> Result<ComponentTypeId, StoreError> {
        if let Some(id) = self.id_of::<T>() {
            return Ok(id);
        }

        let id = if let Some(id) = self.free_ids.pop_first() {
            id
        } else if self.cursor < self.limit {
            let id = ComponentTypeId::new(self.cursor as u16);
            self.cursor += 1;
            id
        } else {
            return Err(StoreError::LimitReached { limit: self.limit });
        };

        self.entries[id.index()] = Some(Box::new(TypedStore::<T> {
            dense: DenseStore::new(self.store_capacity),
        }));
        self.by_type.insert(TypeId::of::<T>(), id);
        tracing::debug!(component = T::type_name(), id = %id, "registered component store");
        Ok(id)
    }

    /// Drop the store for `T` and recycle its id.
    pub fn release<T: Component>(&mut self) -> Option<ComponentTypeId> {
        let id = self.by_type.remove(&TypeId::of::<T>())?;
        self.entries[id.index()] = None;
        self.free_ids.insert(id);
        tracing::debug!(component = T::type_name(), id = %id, "released component store");
        Some(id)
    }

    pub fn typed<T: Component>(&self, id: ComponentTypeId) -> Option<&DenseStore<T>> {
        self.entries
            .get(id.index())?
            .as_ref()?
            .as_any()
            .downcast_ref::<DenseStore<T>>()
    }

    pub fn typed_mut<T: Component>(&mut self, id: ComponentTypeId) -> Option<&mut DenseStore<T>> {
        self.entries
            .get_mut(id.index())?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<DenseStore<T>>()
    }

    /// Name of the component type stored under `id`.
    pub fn name_of(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.entries
            .get(id.index())?
            .as_ref()
            .map(|store| store.component_name())
    }

    /// Number of currently registered component types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every store and forget all type ids.
    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
        self.by_type.clear();
        self.free_ids.clear();
        self.cursor = 0;
    }
}
