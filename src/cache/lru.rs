//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

// == Slot Id ==
/// Handle to a key's position in the tracker, stable until the key is removed.
pub type SlotId = usize;

#[derive(Debug)]
struct Slot {
    key: String,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// A doubly-linked list threaded through a slot arena:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every operation is O(1). Freed slots are reused by later inserts.
#[derive(Debug, Default)]
pub struct LruTracker {
    slots: Vec<Slot>,
    /// Slots available for reuse
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts a key as most recently used and returns its slot.
    pub fn push_front(&mut self, key: String) -> SlotId {
        let slot = Slot {
            key,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = slot;
                id
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        self.link_front(id);
        self.len += 1;
        id
    }

    // == Touch ==
    /// Marks a slot as recently used (moves to front).
    pub fn touch(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Removes a slot from the tracker and returns its key.
    pub fn remove(&mut self, id: SlotId) -> String {
        self.unlink(id);
        self.free.push(id);
        self.len -= 1;
        std::mem::take(&mut self.slots[id].key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.tail.map(|id| self.remove(id))
    }

    // == Keys ==
    /// Returns tracked keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            keys.push(self.slots[id].key.clone());
            cursor = self.slots[id].next;
        }
        keys
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn link_front(&mut self, id: SlotId) {
        self.slots[id].prev = None;
        self.slots[id].next = self.head;
        match self.head {
            Some(head) => self.slots[head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = (self.slots[id].prev, self.slots[id].next);
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }
        self.slots[id].prev = None;
        self.slots[id].next = None;
    }
}
