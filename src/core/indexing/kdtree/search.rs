// src/core/indexing/kdtree/search.rs

//! Fixed-radius search over a KD-Tree.

use tracing::debug;

use super::geometry::distance_squared;
use super::tree::{KdNode, KdTree};
use crate::core::types::{Coordinates, Product};

/// A product found by a radius search, with its squared distance to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub product: &'a Product,
    pub distance_sq: f64,
}

impl Neighbor<'_> {
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Returns every product whose Euclidean distance to `target` is `<= radius`.
///
/// The order of the result is unspecified. A product sitting exactly on the
/// target is included, and duplicates appear once per occurrence in the tree.
/// A negative or NaN radius yields an empty result. `target` must not contain
/// NaN.
pub fn find_within_radius<'a>(tree: &'a KdTree, target: &Coordinates, radius: f64) -> Vec<&'a Product> {
    find_neighbors_within_radius(tree, target, radius)
        .into_iter()
        .map(|neighbor| neighbor.product)
        .collect()
}

/// Same traversal as [`find_within_radius`], keeping the distance of each hit.
pub fn find_neighbors_within_radius<'a>(
    tree: &'a KdTree,
    target: &Coordinates,
    radius: f64,
) -> Vec<Neighbor<'a>> {
    let mut results = Vec::new();
    if radius.is_nan() || radius < 0.0 {
        return results;
    }

    if let Some(root) = tree.root() {
        search_recursive(root, target, radius * radius, &mut results);
    }
    debug!(radius, found = results.len(), indexed = tree.len(), "radius search");
    results
}

fn search_recursive<'a>(
    node: &'a KdNode,
    target: &Coordinates,
    radius_sq: f64,
    results: &mut Vec<Neighbor<'a>>,
) {
    let distance_sq = distance_squared(target, &node.product.coordinates);
    if distance_sq <= radius_sq {
        results.push(Neighbor {
            product: &node.product,
            distance_sq,
        });
    }

    let axis = node.axis;
    let pivot_coord = node.product.coordinates[axis];
    let (near, far) = if target[axis] > pivot_coord {
        (node.right(), node.left())
    } else {
        (node.left(), node.right())
    };

    if let Some(child) = near {
        search_recursive(child, target, radius_sq, results);
    }

    // Anything on the far side is at least this far away along the split axis alone.
    let axis_distance = target[axis] - pivot_coord;
    if axis_distance * axis_distance <= radius_sq {
        if let Some(child) = far {
            search_recursive(child, target, radius_sq, results);
        }
    }
}
