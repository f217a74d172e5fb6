//! This module contains geometry related functionality.

mod kdtree;
pub use self::kdtree::KdTree;
