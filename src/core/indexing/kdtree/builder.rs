// src/core/indexing/kdtree/builder.rs

//! Logic for building a KD-Tree from a set of products.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::max_variance_axis;
use super::tree::{KdNode, KdTree};
use crate::core::types::{Product, DIMENSIONS};

/// How the split axis is chosen for each partition step.
///
/// The chosen axis is stored on every node, so the search mirrors construction
/// under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Split along the axis with the largest variance of the remaining products,
    /// lowest axis index on ties.
    #[default]
    Variance,
    /// Split along `depth % 3`, independent of the data.
    RoundRobin,
}

impl SplitPolicy {
    /// Selects the axis to partition `products` on at the given depth.
    pub fn split_axis(self, products: &[Product], depth: usize) -> usize {
        match self {
            Self::Variance => max_variance_axis(products),
            Self::RoundRobin => depth % DIMENSIONS,
        }
    }
}

/// Builds a KD-Tree from `products`.
///
/// Each level sorts its range with a stable sort on the split-axis coordinate
/// (`f64::total_cmp`), so products with equal coordinates keep the order they
/// entered the partition with and the result is deterministic for a given input
/// order. The median is at index `n / 2`; for even `n` that is the element just
/// after the midpoint.
///
/// Under [`SplitPolicy::Variance`] the variance is recomputed on every level,
/// which makes construction O(n log² n).
///
/// An empty input produces an empty tree.
pub fn build_kdtree(products: Vec<Product>, policy: SplitPolicy) -> KdTree {
    let len = products.len();
    let root = build_recursive(products, policy, 0);
    let tree = KdTree::new(root, len, policy);
    debug!(len, height = tree.height(), ?policy, "built kd-tree");
    tree
}

/// Recursively builds the subtree for `products`, taking ownership so the
/// pivot can be moved into its node and each half handed down by value.
fn build_recursive(
    mut products: Vec<Product>,
    policy: SplitPolicy,
    depth: usize,
) -> Option<Box<KdNode>> {
    if products.is_empty() {
        return None;
    }

    let axis = policy.split_axis(&products, depth);
    products.sort_by(|a, b| a.coordinates[axis].total_cmp(&b.coordinates[axis]));

    let median_idx = products.len() / 2;
    let right_products = products.split_off(median_idx + 1);
    let pivot = products.pop()?;

    let left = build_recursive(products, policy, depth + 1);
    let right = build_recursive(right_products, policy, depth + 1);

    Some(Box::new(KdNode {
        product: pivot,
        axis,
        left,
        right,
    }))
}
