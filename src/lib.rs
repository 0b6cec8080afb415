#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![forbid(unsafe_code)]

//! # orthos: a static 3D product index
//!
//! `orthos` indexes a fixed set of labeled 3D points ("products") in a KD-Tree
//! and answers fixed-radius queries against it.
//! It features:
//! - Median-partitioned KD-Tree with variance-driven or round-robin split axes
//! - Pruning radius search over an immutable, thread-shareable tree
//! - Delimited-text reader and writer for `id,name,x,y,z` records
//! - Distance-ranked recommendations around a target product

pub mod api;
pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::common::OrthosError;
pub use crate::core::indexing::kdtree::{build_kdtree, find_within_radius, KdTree, SplitPolicy};
pub use crate::core::types::{Coordinates, Product};
pub use crate::core::Config;
pub use api::ProductCatalog;

/// Core result type for the library
pub type Result<T> = std::result::Result<T, OrthosError>;
