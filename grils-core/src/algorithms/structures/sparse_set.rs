#[cfg(test)]
#[path = "../../../tests/unit/algorithms/structures/sparse_set_test.rs"]
mod sparse_set_test;

/// A set of small integers with constant time insert, membership test and
/// clear, backed by a flag array plus a dense element list.
pub struct SparseIntSet {
    flags: Vec<bool>,
    elements: Vec<i32>,
}

impl SparseIntSet {
    /// Creates a set able to hold values in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self { flags: vec![false; capacity], elements: Vec::new() }
    }

    /// Inserts a value if it is not already present.
    pub fn insert(&mut self, value: i32) {
        if !self.contains(value) {
            self.insert_unchecked(value);
        }
    }

    /// Inserts a value which is known to be absent.
    pub fn insert_unchecked(&mut self, value: i32) {
        debug_assert!(!self.flags[value as usize]);
        self.flags[value as usize] = true;
        self.elements.push(value);
    }

    /// Returns whether the value is present.
    pub fn contains(&self, value: i32) -> bool {
        self.flags[value as usize]
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        for &value in &self.elements {
            self.flags[value as usize] = false;
        }
        self.elements.clear();
    }

    /// Returns the inserted values in insertion order.
    pub fn elements(&self) -> &[i32] {
        &self.elements
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
