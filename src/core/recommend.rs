// src/core/recommend.rs

//! Ranks the products around a target by distance.

use serde::{Deserialize, Serialize};

use crate::core::indexing::kdtree::{find_neighbors_within_radius, KdTree};
use crate::core::types::{Coordinates, Product};

/// A product near the target, with its distance and a similarity score in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub distance: f64,
    pub similarity: f64,
}

/// Maps a distance to a similarity score: 1 at distance 0, falling towards 0.
pub fn similarity(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// Products within `radius` of `target`, closest first (ties by identifier).
///
/// With `exclude_target` set, every indexed product sharing the target's
/// identifier is left out.
pub fn recommend(
    tree: &KdTree,
    target: &Product,
    radius: f64,
    exclude_target: bool,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        find_neighbors_within_radius(tree, &target.coordinates, radius)
            .into_iter()
            .filter(|neighbor| !(exclude_target && neighbor.product.id == target.id))
            .map(|neighbor| {
                let distance = neighbor.distance();
                Recommendation {
                    id: neighbor.product.id.clone(),
                    name: neighbor.product.name.clone(),
                    coordinates: neighbor.product.coordinates,
                    distance,
                    similarity: similarity(distance),
                }
            })
            .collect();

    recommendations.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.id.cmp(&b.id)));
    recommendations
}
