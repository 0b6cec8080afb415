pub mod kdtree;

pub use kdtree::{build_kdtree, find_within_radius, KdTree, SplitPolicy};
