// slots.rs - Fixed-capacity entity table with a free-list allocator

use crate::ecs::{ComponentMask, EntityId};
use std::collections::HashMap;

/// One slot of the entity table.
#[derive(Clone, Debug, Default)]
pub struct EntityRecord {
    pub id: EntityId,
    pub active: bool,
    pub mask: ComponentMask,
    pub name: String,
}

/// Reasons the slot table rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    Full { capacity: usize },
    Inactive(EntityId),
    UnknownName(String),
}

/// Allocates and reclaims entity slots and maintains the name index.
///
/// Freed slots are reused most-recently-freed first; otherwise the cursor
/// hands out the next never-used index until `capacity` is reached.
///
/// Names need not be unique. The index keeps the first live holder of a
/// name; later entities with the same name are created but not indexed.
pub struct SlotTable {
    records: Box<[EntityRecord]>,
    free: Vec<u32>,
    cursor: usize,
    live: usize,
    names: HashMap<String, EntityId>,
}

impl SlotTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: vec![EntityRecord::default(); capacity].into_boxed_slice(),
            free: Vec::new(),
            cursor: 0,
            live: 0,
            names: HashMap::new(),
        }
    }

    /// Claim a slot. Only fails when the table is full.
    pub fn create(&mut self, name: Option<&str>) -> Result<EntityId, SlotError> {
        let index = match self.free.pop() {
            Some(index) => index as usize,
            None if self.cursor < self.records.len() => {
                self.cursor += 1;
                self.cursor - 1
            }
            None => {
                return Err(SlotError::Full {
                    capacity: self.records.len(),
                })
            }
        };

        let id = EntityId::from_index(index as u32);
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Unnamed Entity. EID = {}", id.index()),
        };

        let record = &mut self.records[index];
        debug_assert!(!record.active, "allocated slot {index} is still active");
        record.id = id;
        record.active = true;
        record.mask.reset();
        record.name.clone_from(&name);
        self.names.entry(name).or_insert(id);
        self.live += 1;

        Ok(id)
    }

    pub fn destroy(&mut self, id: EntityId) -> Result<(), SlotError> {
        let record = self.record_mut(id).ok_or(SlotError::Inactive(id))?;
        record.active = false;
        record.mask.reset();
        let name = std::mem::take(&mut record.name);

        // Only drop the index entry if it points at this entity
        if self.names.get(&name) == Some(&id) {
            self.names.remove(&name);
        }
        self.free.push(id.index() as u32);
        self.live -= 1;
        Ok(())
    }

    pub fn lookup_by_name(&self, name: &str) -> Result<EntityId, SlotError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SlotError::UnknownName(name.to_string()))
    }

    pub fn reset(&mut self) {
        for record in self.records[..self.cursor].iter_mut() {
            *record = EntityRecord::default();
        }
        self.free.clear();
        self.names.clear();
        self.cursor = 0;
        self.live = 0;
    }

    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.record(id).is_some()
    }

    /// Active record for `id`, `None` if the slot is free or out of range.
    #[inline]
    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(id.index()).filter(|r| r.active)
    }

    #[inline]
    pub fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.records.get_mut(id.index()).filter(|r| r.active)
    }

    /// Active records in ascending slot order.
    pub fn active(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.records[..self.cursor].iter().filter(|r| r.active)
    }

    /// Every slot ever handed out, active or not.
    pub(crate) fn used_mut(&mut self) -> &mut [EntityRecord] {
        &mut self.records[..self.cursor]
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// One past the highest slot index handed out so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn create_until_full() {
        let mut table = SlotTable::new(3);
        for expected in 0..3 {
            assert_eq!(table.create(None).unwrap().index(), expected);
        }
        assert_eq!(table.create(None), Err(SlotError::Full { capacity: 3 }));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn most_recently_freed_is_reused_first() {
        let mut table = SlotTable::new(8);
        let ids: Vec<_> = (0..4).map(|_| table.create(None).unwrap()).collect();
        table.destroy(ids[1]).unwrap();
        table.destroy(ids[3]).unwrap();

        assert_eq!(table.create(None).unwrap(), ids[3]);
        assert_eq!(table.create(None).unwrap(), ids[1]);
        assert_eq!(table.create(None).unwrap().index(), 4);
    }

    #[test]
    fn destroy_clears_mask_and_name() {
        let mut table = SlotTable::new(2);
        let id = table.create(Some("player")).unwrap();
        table.record_mut(id).unwrap().mask.set(crate::ecs::ComponentTypeId::new(3));
        table.destroy(id).unwrap();

        assert!(!table.is_alive(id));
        assert_eq!(
            table.lookup_by_name("player"),
            Err(SlotError::UnknownName("player".to_string()))
        );
        assert_eq!(table.destroy(id), Err(SlotError::Inactive(id)));

        let again = table.create(None).unwrap();
        assert_eq!(again, id);
        assert!(table.record(again).unwrap().mask.is_empty());
    }

    #[test]
    fn generated_names() {
        let mut table = SlotTable::new(4);
        let a = table.create(None).unwrap();
        let b = table.create(Some("")).unwrap();
        assert_eq!(table.record(a).unwrap().name, "Unnamed Entity. EID = 0");
        assert_eq!(table.lookup_by_name("Unnamed Entity. EID = 1"), Ok(b));
    }

    #[test]
    fn shared_name_keeps_first_holder() {
        let mut table = SlotTable::new(4);
        let first = table.create(Some("camera")).unwrap();
        let second = table.create(Some("camera")).unwrap();
        assert_ne!(first, second);
        assert_eq!(table.record(second).unwrap().name, "camera");
        assert_eq!(table.lookup_by_name("camera"), Ok(first));

        // Destroying the unindexed entity leaves the binding alone
        table.destroy(second).unwrap();
        assert_eq!(table.lookup_by_name("camera"), Ok(first));

        table.destroy(first).unwrap();
        assert!(table.lookup_by_name("camera").is_err());
    }

    #[test]
    fn generated_name_collision_does_not_block_creation() {
        let mut table = SlotTable::new(8);
        let squatter = table.create(Some("Unnamed Entity. EID = 1")).unwrap();

        let ids: Vec<_> = (0..3).map(|_| table.create(None).unwrap()).collect();
        assert_eq!(
            ids.iter().map(|id| id.index()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(table.len(), 4);
        assert_eq!(table.lookup_by_name("Unnamed Entity. EID = 1"), Ok(squatter));

        table.destroy(ids[0]).unwrap();
        assert_eq!(table.lookup_by_name("Unnamed Entity. EID = 1"), Ok(squatter));
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut table = SlotTable::new(4);
        table.create(Some("a")).unwrap();
        let b = table.create(None).unwrap();
        table.destroy(b).unwrap();
        table.reset();

        assert!(table.is_empty());
        assert_eq!(table.cursor(), 0);
        assert!(table.lookup_by_name("a").is_err());
        assert_eq!(table.create(None).unwrap().index(), 0);
    }

    #[test]
    fn active_ids_never_collide() {
        let mut table = SlotTable::new(16);
        let mut live = Vec::new();
        for step in 0..200u32 {
            if step % 3 == 2 && !live.is_empty() {
                let victim = live.remove((step as usize * 7) % live.len());
                table.destroy(victim).unwrap();
            } else if let Ok(id) = table.create(None) {
                live.push(id);
            }
            let unique: HashSet<_> = table.active().map(|r| r.id).collect();
            assert_eq!(unique.len(), table.len());
            assert_eq!(unique.len(), live.len());
        }
    }
}
