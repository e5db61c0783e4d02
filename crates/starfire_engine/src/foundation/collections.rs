//! Specialized collection types
//!
//! [`RecyclingArena`] is the storage behind every pool in the engine. Slots are
//! never freed: a released slot goes onto a recycle stack and is handed out
//! again by the next acquire, so steady-state play does not allocate.

/// Generational key into a [`RecyclingArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Index in the slot vector
    pub index: u32,
    /// Generation counter to prevent use-after-recycle
    pub generation: u32,
}

impl SlotKey {
    /// Create a new key with index and generation
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

#[derive(Debug)]
struct ArenaSlot<T> {
    value: T,
    generation: u32,
    live: bool,
}

/// Free list with generation counters
///
/// A key is valid only while its slot is live and the generations match.
/// Releasing a slot bumps its generation, so every key handed out before the
/// release goes stale.
#[derive(Debug)]
pub struct RecyclingArena<T> {
    slots: Vec<ArenaSlot<T>>,
    recycled: Vec<u32>,
    live_count: usize,
}

impl<T> RecyclingArena<T> {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            recycled: Vec::new(),
            live_count: 0,
        }
    }

    /// Store `value`, reusing the most recently released slot if any
    ///
    /// Returns the key and whether a recycled slot was reused.
    pub fn acquire(&mut self, value: T) -> (SlotKey, bool) {
        self.live_count += 1;
        if let Some(index) = self.recycled.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = value;
            slot.live = true;
            (SlotKey::new(index, slot.generation), true)
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(ArenaSlot {
                value,
                generation: 0,
                live: true,
            });
            (SlotKey::new(index, 0), false)
        }
    }

    /// Release a live slot onto the recycle stack
    ///
    /// Returns `false` (and does nothing) for stale or already released keys.
    pub fn release(&mut self, key: SlotKey) -> bool {
        let Some(slot) = self.slots.get_mut(key.index as usize) else {
            return false;
        };
        if !slot.live || slot.generation != key.generation {
            return false;
        }
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.recycled.push(key.index);
        self.live_count -= 1;
        true
    }

    /// Whether `key` names a live slot
    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Get a live value by key
    pub fn get(&self, key: SlotKey) -> Option<&T> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.live && slot.generation == key.generation)
            .map(|slot| &slot.value)
    }

    /// Get a mutable reference to a live value by key
    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.live && slot.generation == key.generation)
            .map(|slot| &mut slot.value)
    }

    /// Snapshot the keys of all live slots in slot order
    pub fn live_keys(&self) -> Vec<SlotKey> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Iterate over live slots
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> {
        self.slots.iter().enumerate().filter(|(_, slot)| slot.live).map(|(index, slot)| {
            (SlotKey::new(index as u32, slot.generation), &slot.value)
        })
    }

    /// Iterate mutably over live slots
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotKey, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.live)
            .map(|(index, slot)| (SlotKey::new(index as u32, slot.generation), &mut slot.value))
    }

    /// Number of live slots
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether no slot is live
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Number of slots waiting on the recycle stack
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    /// Total number of slots ever allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for RecyclingArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_then_acquire_reuses_slot() {
        let mut arena = RecyclingArena::new();
        let (first, reused) = arena.acquire("a");
        assert!(!reused);
        assert!(arena.release(first));

        let (second, reused) = arena.acquire("b");
        assert!(reused);
        assert_eq!(second.index, first.index);
        assert_ne!(second.generation, first.generation);
        assert_eq!(arena.capacity(), 1);
    }

    #[test]
    fn test_stale_key_is_rejected() {
        let mut arena = RecyclingArena::new();
        let (key, _) = arena.acquire(1);
        arena.release(key);
        arena.acquire(2);

        assert!(arena.get(key).is_none());
        assert!(!arena.release(key));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_double_release_pushes_once() {
        let mut arena = RecyclingArena::new();
        let (key, _) = arena.acquire(1);
        assert!(arena.release(key));
        assert!(!arena.release(key));
        assert_eq!(arena.recycled_len(), 1);
    }

    #[test]
    fn test_live_keys_skip_released() {
        let mut arena = RecyclingArena::new();
        let (a, _) = arena.acquire(1);
        let (b, _) = arena.acquire(2);
        let (c, _) = arena.acquire(3);
        arena.release(b);
        assert_eq!(arena.live_keys(), vec![a, c]);
    }
}
