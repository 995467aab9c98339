//! An indexed binary min-heap.
//!
//! Heap entries are ids into an external store (see [`PriorityStore`]).
//! The heap reads each entry's key through the store on every comparison
//! and writes the entry's current slot back after every move, so a caller
//! that lowers a key in place only has to call
//! [`update`](IndexedMinHeap::update) with the entry's slot to restore
//! ordering in O(log n).

/// Marker for the unused tail of the backing array.
const VACANT: u32 = u32::MAX;

/// Minimum backing-array capacity.
const MIN_CAPACITY: usize = 10;

/// Storage addressed by an [`IndexedMinHeap`].
///
/// Priorities are read through it on every comparison, and slot positions
/// are written back after every move so entries always know where they
/// sit in the heap.
pub trait PriorityStore {
    /// Current priority key for `id`. Lower keys pop first.
    fn priority(&self, id: u32) -> i32;

    /// Record that `id` now occupies heap slot `slot`.
    fn set_slot(&mut self, id: u32, slot: usize);
}

/// A binary min-heap over ids held in a [`PriorityStore`].
///
/// The backing array always spans the full capacity; `count` tracks the
/// occupied prefix. Capacity never drops below [`MIN_CAPACITY`] and
/// doubles when an insert overflows.
pub struct IndexedMinHeap {
    slots: Vec<u32>,
    count: usize,
}

impl Default for IndexedMinHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexedMinHeap {
    /// Create an empty heap with the minimum capacity.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Create an empty heap with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![VACANT; capacity.max(MIN_CAPACITY)],
            count: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current backing-array capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert `id`, doubling the backing array first if it is full.
    pub fn insert<S: PriorityStore>(&mut self, store: &mut S, id: u32) {
        if self.count == self.slots.len() {
            let doubled = self.slots.len() * 2;
            self.slots.resize(doubled, VACANT);
        }
        self.slots[self.count] = id;
        store.set_slot(id, self.count);
        self.count += 1;
        self.bubble_up(store, self.count - 1);
    }

    /// The id with the smallest key, without removing it.
    pub fn peek(&self) -> Option<u32> {
        if self.count == 0 {
            return None;
        }
        Some(self.slots[0])
    }

    /// Remove and return the id with the smallest key.
    pub fn pop<S: PriorityStore>(&mut self, store: &mut S) -> Option<u32> {
        if self.count == 0 {
            return None;
        }
        let top = self.slots[0];
        self.count -= 1;
        if self.count > 0 {
            self.slots[0] = self.slots[self.count];
            store.set_slot(self.slots[0], 0);
            self.bubble_down(store, 0);
        }
        self.slots[self.count] = VACANT;
        Some(top)
    }

    /// Restore the heap property around `slot` after its entry's key
    /// changed in place.
    ///
    /// A slot outside `[0, count)` is a no-op.
    pub fn update<S: PriorityStore>(&mut self, store: &mut S, slot: usize) {
        if slot >= self.count {
            return;
        }
        let key = store.priority(self.slots[slot]);
        if slot > 0 && key < store.priority(self.slots[(slot - 1) / 2]) {
            self.bubble_up(store, slot);
        } else {
            self.bubble_down(store, slot);
        }
    }

    /// Resize the backing array, clamped to [`MIN_CAPACITY`].
    ///
    /// Shrinking below `count` discards the tail entries; callers only do
    /// this when they know the tail is unused.
    pub fn resize(&mut self, new_capacity: usize) {
        let capacity = new_capacity.max(MIN_CAPACITY);
        self.slots.resize(capacity, VACANT);
        if self.count > capacity {
            self.count = capacity;
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.slots[..self.count].fill(VACANT);
        self.count = 0;
    }

    fn bubble_up<S: PriorityStore>(&mut self, store: &mut S, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if store.priority(self.slots[slot]) < store.priority(self.slots[parent]) {
                self.swap(store, slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn bubble_down<S: PriorityStore>(&mut self, store: &mut S, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.count {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.count
                && store.priority(self.slots[right]) < store.priority(self.slots[left])
            {
                child = right;
            }
            if store.priority(self.slots[child]) < store.priority(self.slots[slot]) {
                self.swap(store, slot, child);
                slot = child;
            } else {
                break;
            }
        }
    }

    fn swap<S: PriorityStore>(&mut self, store: &mut S, a: usize, b: usize) {
        self.slots.swap(a, b);
        store.set_slot(self.slots[a], a);
        store.set_slot(self.slots[b], b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Test store: one key and one slot position per id.
    struct Store {
        keys: Vec<i32>,
        slots: Vec<usize>,
    }

    impl Store {
        fn new(keys: Vec<i32>) -> Self {
            let n = keys.len();
            Self {
                keys,
                slots: vec![usize::MAX; n],
            }
        }
    }

    impl PriorityStore for Store {
        fn priority(&self, id: u32) -> i32 {
            self.keys[id as usize]
        }

        fn set_slot(&mut self, id: u32, slot: usize) {
            self.slots[id as usize] = slot;
        }
    }

    /// Assert the heap property and the slot back-references.
    fn assert_well_formed(heap: &IndexedMinHeap, store: &Store) {
        for i in 0..heap.count {
            let key = store.priority(heap.slots[i]);
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            if left < heap.count {
                assert!(key <= store.priority(heap.slots[left]));
            }
            if right < heap.count {
                assert!(key <= store.priority(heap.slots[right]));
            }
            assert_eq!(store.slots[heap.slots[i] as usize], i);
        }
    }

    #[test]
    fn pop_yields_keys_in_non_decreasing_order() {
        let mut rng = rand::rng();
        let keys: Vec<i32> = (0..100).map(|_| rng.random_range(-1000..1000)).collect();
        let mut store = Store::new(keys.clone());
        let mut heap = IndexedMinHeap::new();
        for id in 0..keys.len() as u32 {
            heap.insert(&mut store, id);
            assert_well_formed(&heap, &store);
        }

        let mut popped = Vec::new();
        while let Some(id) = heap.pop(&mut store) {
            popped.push(store.priority(id));
            assert_well_formed(&heap, &store);
        }
        let mut sorted = keys;
        sorted.sort_unstable();
        assert_eq!(popped, sorted);
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut store = Store::new(vec![5, 1, 3]);
        let mut heap = IndexedMinHeap::new();
        for id in 0..3 {
            heap.insert(&mut store, id);
        }
        assert_eq!(heap.peek(), Some(1));
        assert_eq!(heap.peek(), Some(1));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn empty_heap_returns_none() {
        let mut store = Store::new(vec![]);
        let mut heap = IndexedMinHeap::new();
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(&mut store), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn update_after_decrease_key_restores_order() {
        let mut store = Store::new(vec![50, 40, 30, 20, 10]);
        let mut heap = IndexedMinHeap::new();
        for id in 0..5 {
            heap.insert(&mut store, id);
        }
        assert_eq!(heap.peek(), Some(4));

        // Lower the key of the worst entry and tell the heap.
        store.keys[0] = -1;
        let slot = store.slots[0];
        heap.update(&mut store, slot);
        assert_well_formed(&heap, &store);
        assert_eq!(heap.peek(), Some(0));
    }

    #[test]
    fn update_after_increase_key_restores_order() {
        let mut store = Store::new(vec![10, 20, 30, 40]);
        let mut heap = IndexedMinHeap::new();
        for id in 0..4 {
            heap.insert(&mut store, id);
        }

        store.keys[0] = 99;
        let slot = store.slots[0];
        heap.update(&mut store, slot);
        assert_well_formed(&heap, &store);
        assert_eq!(heap.peek(), Some(1));
    }

    #[test]
    fn update_out_of_range_is_a_noop() {
        let mut store = Store::new(vec![3, 1, 2]);
        let mut heap = IndexedMinHeap::new();
        for id in 0..3 {
            heap.insert(&mut store, id);
        }
        // `count` itself is already out of range.
        heap.update(&mut store, heap.len());
        heap.update(&mut store, 999);
        assert_well_formed(&heap, &store);
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn insert_doubles_capacity_on_overflow() {
        let keys: Vec<i32> = (0..11).collect();
        let mut store = Store::new(keys);
        let mut heap = IndexedMinHeap::new();
        assert_eq!(heap.capacity(), 10);
        for id in 0..11 {
            heap.insert(&mut store, id);
        }
        assert_eq!(heap.capacity(), 20);
        assert_eq!(heap.len(), 11);
        assert_well_formed(&heap, &store);
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let mut heap = IndexedMinHeap::with_capacity(40);
        heap.resize(2);
        assert_eq!(heap.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn resize_below_count_discards_tail() {
        let keys: Vec<i32> = (0..20).collect();
        let mut store = Store::new(keys);
        let mut heap = IndexedMinHeap::with_capacity(20);
        for id in 0..20 {
            heap.insert(&mut store, id);
        }
        heap.resize(10);
        assert_eq!(heap.len(), 10);
        assert_eq!(heap.capacity(), 10);
        assert_well_formed(&heap, &store);
    }

    #[test]
    fn clear_empties_the_heap() {
        let mut store = Store::new(vec![2, 1]);
        let mut heap = IndexedMinHeap::new();
        heap.insert(&mut store, 0);
        heap.insert(&mut store, 1);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(&mut store), None);
    }
}
