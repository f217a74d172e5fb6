#[cfg(test)]
#[path = "../../../tests/unit/algorithms/structures/lru_cache_test.rs"]
mod lru_cache_test;

const UNLINKED: i32 = -1;

#[derive(Clone, Copy)]
struct Entry {
    prev: i32,
    next: i32,
    used: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Self { prev: UNLINKED, next: UNLINKED, used: false }
    }
}

/// A capacity bounded, most-recently-inserted-first list of vertex ids.
///
/// Inserting an id moves it to the front; once the capacity is reached the
/// least recently inserted id is evicted. Iteration yields ids from the most
/// to the least recently inserted one.
#[derive(Clone)]
pub struct LruCache {
    capacity: usize,
    entries: Vec<Entry>,
    count: usize,
    head: i32,
    tail: i32,
}

impl LruCache {
    /// Creates a cache with the given capacity for ids in `0..ids_num`.
    pub fn new(capacity: usize, ids_num: usize) -> Self {
        Self { capacity, entries: vec![Entry::default(); ids_num], count: 0, head: UNLINKED, tail: UNLINKED }
    }

    /// Inserts an id, splaying it to the front of the list.
    pub fn insert(&mut self, id: i32) {
        if self.entries[id as usize].used {
            self.unlink(id);
        } else if self.count == self.capacity {
            let tail = self.tail;
            self.unlink(tail);
        } else {
            self.count += 1;
        }
        self.link_front(id);
    }

    /// Removes all ids.
    pub fn clear(&mut self) {
        let mut curr = self.head;
        while curr != UNLINKED {
            let next = self.entries[curr as usize].next;
            self.entries[curr as usize] = Entry::default();
            curr = next;
        }
        self.count = 0;
        self.head = UNLINKED;
        self.tail = UNLINKED;
    }

    /// Returns the number of cached ids.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over cached ids, most recently inserted first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        let mut curr = self.head;
        std::iter::from_fn(move || {
            if curr == UNLINKED {
                None
            } else {
                let id = curr;
                curr = self.entries[curr as usize].next;
                Some(id)
            }
        })
    }

    fn unlink(&mut self, id: i32) {
        debug_assert!(self.entries[id as usize].used);

        let Entry { prev, next, .. } = self.entries[id as usize];

        if prev == UNLINKED {
            self.head = next;
        } else {
            self.entries[prev as usize].next = next;
        }

        if next == UNLINKED {
            self.tail = prev;
        } else {
            self.entries[next as usize].prev = prev;
        }

        self.entries[id as usize] = Entry::default();
    }

    fn link_front(&mut self, id: i32) {
        debug_assert!(!self.entries[id as usize].used);

        self.entries[id as usize].used = true;
        self.entries[id as usize].next = self.head;
        self.entries[id as usize].prev = UNLINKED;

        if self.head != UNLINKED {
            self.entries[self.head as usize].prev = id;
        }
        self.head = id;

        if self.tail == UNLINKED {
            self.tail = id;
        }
    }
}
