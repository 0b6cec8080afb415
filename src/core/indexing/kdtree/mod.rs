// src/core/indexing/kdtree/mod.rs

//! Static KD-Tree over 3D products with fixed-radius search.
//!
//! The tree is built once from a product set and never mutated. Each node owns
//! a single product as its pivot and records the axis it split on, which the
//! search reads back when deciding whether the far side of a node can hold a
//! match.

mod builder;
pub mod geometry;
mod search;
mod tree;

pub use self::builder::{build_kdtree, SplitPolicy};
pub use self::search::{find_neighbors_within_radius, find_within_radius, Neighbor};
pub use self::tree::{Iter, KdNode, KdTree};
