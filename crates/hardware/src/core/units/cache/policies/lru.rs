//! Least Recently Used (LRU) Set.
//!
//! One associative set holding up to `capacity` tags in recency order. The most
//! recently used tag sits at the head of the list and the least recently used
//! at the tail, so the eviction victim is always the tail.
//!
//! The list is an arena: a vector of slots linked by indices, with freed slots
//! recycled through a free list. A map from tag to slot gives constant-time
//! lookup, so hits, promotions, inserts, and evictions are all O(1).
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup_and_promote()`: O(1) expected
//!   - `insert()`: O(1) expected
//!   - `evict()`: O(1) expected
//! - **Space Complexity:** O(W) where W is the associativity; slots are allocated
//!   on first use, never beyond `capacity`.

use std::collections::HashMap;

/// Link value for "no neighbour".
const NIL: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Slot {
    tag: u64,
    prev: usize,
    next: usize,
}

/// A capacity-bounded, recency-ordered set of tags.
#[derive(Clone, Debug)]
pub struct LruSet {
    slots: Vec<Slot>,
    free: Vec<usize>,
    lookup: HashMap<u64, usize>,
    /// Most recently used slot.
    head: usize,
    /// Least recently used slot.
    tail: usize,
    capacity: usize,
}

impl LruSet {
    /// Creates an empty set that holds at most `capacity` tags.
    ///
    /// A capacity of zero is allowed: every insert immediately evicts the
    /// inserted tag, so the set never reports a hit.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            lookup: HashMap::new(),
            head: NIL,
            tail: NIL,
            capacity,
        }
    }

    /// Maximum number of tags this set can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tags currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns `true` if the set holds no tags.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Returns `true` if `tag` is present. Does not change recency order.
    #[inline]
    pub fn contains(&self, tag: u64) -> bool {
        self.lookup.contains_key(&tag)
    }

    /// Most recently used tag, if any.
    pub fn mru(&self) -> Option<u64> {
        (self.head != NIL).then(|| self.slots[self.head].tag)
    }

    /// Least recently used tag, i.e. the next eviction victim.
    pub fn lru(&self) -> Option<u64> {
        (self.tail != NIL).then(|| self.slots[self.tail].tag)
    }

    /// Iterates over the held tags from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            cursor: self.head,
        }
    }

    /// Looks up `tag`; on a hit moves it to the most recently used position.
    ///
    /// Returns whether the tag was present. A miss leaves the set untouched.
    pub fn lookup_and_promote(&mut self, tag: u64) -> bool {
        debug_assert!(self.len() <= self.capacity);
        let Some(&slot) = self.lookup.get(&tag) else {
            return false;
        };
        if slot != self.head {
            self.unlink(slot);
            self.push_front(slot);
        }
        true
    }

    /// Inserts `tag` as most recently used, evicting the LRU tag if the set is full.
    ///
    /// Returns the evicted tag, or `None` if there was room. With a capacity of
    /// zero the inserted tag itself is returned.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is already present. Callers insert only after a miss, and
    /// a duplicate would corrupt the recency order every later statistic relies on.
    pub fn insert(&mut self, tag: u64) -> Option<u64> {
        assert!(
            !self.contains(tag),
            "LRU set contract breach: tag {tag:#x} inserted while present"
        );
        if self.capacity == 0 {
            return Some(tag);
        }

        let victim = if self.len() == self.capacity {
            let slot = self.tail;
            let victim = self.slots[slot].tag;
            self.release(slot);
            Some(victim)
        } else {
            None
        };

        let slot = self.allocate(tag);
        self.push_front(slot);
        let _ = self.lookup.insert(tag, slot);

        debug_assert!(self.len() <= self.capacity);
        victim
    }

    /// Removes `tag` if present, returning whether it was.
    ///
    /// Used for back-invalidation when a lower level drops a line this set holds.
    pub fn evict(&mut self, tag: u64) -> bool {
        let Some(&slot) = self.lookup.get(&tag) else {
            return false;
        };
        self.release(slot);
        true
    }

    /// Detaches `slot` from the list, forgets its tag, and recycles it.
    fn release(&mut self, slot: usize) {
        self.unlink(slot);
        let _ = self.lookup.remove(&self.slots[slot].tag);
        self.free.push(slot);
    }

    fn allocate(&mut self, tag: u64) -> usize {
        let fresh = Slot {
            tag,
            prev: NIL,
            next: NIL,
        };
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = fresh;
            slot
        } else {
            self.slots.push(fresh);
            self.slots.len() - 1
        }
    }

    fn unlink(&mut self, slot: usize) {
        let Slot { prev, next, .. } = self.slots[slot];
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        self.slots[slot].prev = NIL;
        self.slots[slot].next = NIL;
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head == NIL {
            self.tail = slot;
        } else {
            self.slots[self.head].prev = slot;
        }
        self.head = slot;
    }
}

/// Iterator over an [`LruSet`] in MRU to LRU order.
#[derive(Debug)]
pub struct Iter<'a> {
    set: &'a LruSet,
    cursor: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.cursor == NIL {
            return None;
        }
        let slot = self.set.slots[self.cursor];
        self.cursor = slot.next;
        Some(slot.tag)
    }
}

impl<'a> IntoIterator for &'a LruSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
