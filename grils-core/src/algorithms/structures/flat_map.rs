#[cfg(test)]
#[path = "../../../tests/unit/algorithms/structures/flat_map_test.rs"]
mod flat_map_test;

// The buffers are sized to the next power of two of 5/4 of the requested
// capacity so probing stays short and the index mask is a single and.
fn buffer_len(max_size: usize) -> usize {
    (max_size * 5 / 4).next_power_of_two()
}

const EMPTY: i32 = i32::MIN;

/// A tiny open addressing set of non-negative integers with linear probing.
///
/// Designed for very small capacities where a handful of probes beats any
/// heap allocated set. Cloning is a plain buffer copy, which the ejection
/// chain search relies on when it forks a chain state.
#[derive(Clone)]
pub struct FlatSet {
    buffer: Vec<i32>,
    mask: usize,
}

impl FlatSet {
    /// Creates a set able to hold up to `max_size` values.
    pub fn new(max_size: usize) -> Self {
        let len = buffer_len(max_size.max(1));
        Self { buffer: vec![EMPTY; len], mask: len - 1 }
    }

    fn slot(&self, value: i32) -> usize {
        debug_assert!(value >= 0);
        let mut index = (value as usize) & self.mask;
        while self.buffer[index] != value && self.buffer[index] != EMPTY {
            index = (index + 1) & self.mask;
        }
        index
    }

    /// Inserts a value. Returns false if it was already present.
    pub fn insert(&mut self, value: i32) -> bool {
        let index = self.slot(value);
        if self.buffer[index] != EMPTY {
            return false;
        }
        self.buffer[index] = value;
        true
    }

    /// Returns whether the value is present.
    pub fn contains(&self, value: i32) -> bool {
        self.buffer[self.slot(value)] != EMPTY
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.buffer.fill(EMPTY);
    }

    /// Copies the contents of another set of the same capacity into this one.
    pub fn copy_from(&mut self, other: &FlatSet) {
        debug_assert_eq!(self.buffer.len(), other.buffer.len());
        self.buffer.copy_from_slice(&other.buffer);
    }

    /// Iterates over the stored values in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.buffer.iter().copied().filter(|&value| value != EMPTY)
    }
}

/// A tiny open addressing map from non-negative integers to values, with the
/// same design tradeoffs as [`FlatSet`].
#[derive(Clone)]
pub struct FlatMap<V: Copy> {
    keys: Vec<i32>,
    values: Vec<V>,
    mask: usize,
}

impl<V: Copy + Default> FlatMap<V> {
    /// Creates a map able to hold up to `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        let len = buffer_len(max_size.max(1));
        Self { keys: vec![EMPTY; len], values: vec![V::default(); len], mask: len - 1 }
    }

    fn slot(&self, key: i32) -> usize {
        debug_assert!(key >= 0);
        let mut index = (key as usize) & self.mask;
        while self.keys[index] != key && self.keys[index] != EMPTY {
            index = (index + 1) & self.mask;
        }
        index
    }

    /// Returns the value stored under the key, if any.
    pub fn get(&self, key: i32) -> Option<V> {
        let index = self.slot(key);
        (self.keys[index] != EMPTY).then(|| self.values[index])
    }

    /// Inserts or overwrites the value stored under the key.
    pub fn set(&mut self, key: i32, value: V) {
        let index = self.slot(key);
        self.keys[index] = key;
        self.values[index] = value;
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.keys.fill(EMPTY);
    }

    /// Copies the contents of another map of the same capacity into this one.
    pub fn copy_from(&mut self, other: &FlatMap<V>) {
        debug_assert_eq!(self.keys.len(), other.keys.len());
        self.keys.copy_from_slice(&other.keys);
        self.values.copy_from_slice(&other.values);
    }
}

/// A fixed number of rows, each a [`FlatSet`], with row level reset and copy.
///
/// Used to track per-search-node forbidden vertices where a child node
/// inherits the parent row and extends it.
pub struct FlatSetMatrix {
    rows: Vec<FlatSet>,
}

impl FlatSetMatrix {
    /// Creates a matrix with the given number of rows, each sized for `row_size` values.
    pub fn new(rows: usize, row_size: usize) -> Self {
        Self { rows: (0..rows).map(|_| FlatSet::new(row_size)).collect() }
    }

    /// Clears a row.
    pub fn reset(&mut self, row: usize) {
        self.rows[row].clear();
    }

    /// Inserts a value into a row.
    pub fn set(&mut self, row: usize, value: i32) {
        self.rows[row].insert(value);
    }

    /// Returns whether a value is present in a row.
    pub fn is_set(&self, row: usize, value: i32) -> bool {
        self.rows[row].contains(value)
    }

    /// Replaces the destination row with a copy of the source row.
    pub fn overwrite(&mut self, source: usize, destination: usize) {
        if source != destination {
            let (src, dst) = if source < destination {
                let (a, b) = self.rows.split_at_mut(destination);
                (&a[source], &mut b[0])
            } else {
                let (a, b) = self.rows.split_at_mut(source);
                (&b[0], &mut a[destination])
            };
            dst.copy_from(src);
        }
    }

    /// Iterates over the values of a row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = i32> + '_ {
        self.rows[row].iter()
    }
}
