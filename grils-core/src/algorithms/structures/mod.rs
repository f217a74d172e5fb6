//! Cache friendly data structures used by the solution representation and
//! the local search machinery. They are all preallocated to a fixed size and
//! cleared between uses rather than reallocated.

mod binary_heap;
pub use self::binary_heap::{HeapSlot, IndexedBinaryHeap, UNHEAPED};

mod fixed_stack;
pub use self::fixed_stack::FixedSizeStack;

mod flat_map;
pub use self::flat_map::{FlatMap, FlatSet, FlatSetMatrix};

mod lru_cache;
pub use self::lru_cache::LruCache;

mod sparse_set;
pub use self::sparse_set::SparseIntSet;
