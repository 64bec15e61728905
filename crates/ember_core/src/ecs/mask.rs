// mask.rs - Per-entity component presence bitset

use crate::ecs::{ComponentTypeId, MAX_COMPONENT_TYPES};

/// Number of `u64` words needed to cover every component type id.
const MASK_WORDS: usize = MAX_COMPONENT_TYPES.div_ceil(64);

/// Fixed-size bitset over all component type ids.
///
/// Bit `i` is set iff the owning entity holds a live component whose type was
/// assigned id `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentMask {
    words: [u64; MASK_WORDS],
}

impl ComponentMask {
    pub const EMPTY: Self = Self {
        words: [0; MASK_WORDS],
    };

    #[inline]
    fn locate(id: ComponentTypeId) -> (usize, u64) {
        let bit = id.index();
        debug_assert!(bit < MAX_COMPONENT_TYPES, "component type id {bit} out of range");
        (bit / 64, 1u64 << (bit % 64))
    }

    #[inline]
    pub fn set(&mut self, id: ComponentTypeId) {
        let (word, bit) = Self::locate(id);
        self.words[word] |= bit;
    }

    #[inline]
    pub fn clear(&mut self, id: ComponentTypeId) {
        let (word, bit) = Self::locate(id);
        self.words[word] &= !bit;
    }

    #[inline]
    pub fn has(&self, id: ComponentTypeId) -> bool {
        let (word, bit) = Self::locate(id);
        self.words[word] & bit != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.words = [0; MASK_WORDS];
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the set component type ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let base = word_index * 64;
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let tz = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(ComponentTypeId::new((base + tz) as u16))
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_has() {
        let mut mask = ComponentMask::default();
        let a = ComponentTypeId::new(5);
        let b = ComponentTypeId::new(70);
        assert!(mask.is_empty());

        mask.set(a);
        mask.set(b);
        assert!(mask.has(a));
        assert!(mask.has(b));
        assert!(!mask.has(ComponentTypeId::new(6)));
        assert_eq!(mask.count(), 2);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![a, b]);

        mask.clear(a);
        assert!(!mask.has(a));
        mask.reset();
        assert_eq!(mask, ComponentMask::EMPTY);
    }

    #[test]
    fn highest_id_fits() {
        let mut mask = ComponentMask::default();
        let last = ComponentTypeId::new((MAX_COMPONENT_TYPES - 1) as u16);
        mask.set(last);
        assert!(mask.has(last));
    }
}
