// src/core/indexing/kdtree/geometry.rs

//! Distance and spread helpers shared by the builder and the search.

use crate::core::types::{Coordinates, Product, DIMENSIONS};

/// Squared Euclidean distance between two positions.
pub fn distance_squared(a: &Coordinates, b: &Coordinates) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(p, q)| (p - q) * (p - q))
        .sum()
}

/// Euclidean distance between two positions.
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Population variance of `products` along each axis.
///
/// Uses a two-pass mean/deviation sum. Fewer than two products have zero spread
/// on every axis.
pub fn axis_variances(products: &[Product]) -> [f64; DIMENSIONS] {
    let mut variances = [0.0; DIMENSIONS];
    if products.len() < 2 {
        return variances;
    }

    let n = products.len() as f64;
    let mut means = [0.0; DIMENSIONS];
    for product in products {
        for (mean, value) in means.iter_mut().zip(product.coordinates.iter()) {
            *mean += value;
        }
    }
    for mean in &mut means {
        *mean /= n;
    }

    for product in products {
        for axis in 0..DIMENSIONS {
            let deviation = product.coordinates[axis] - means[axis];
            variances[axis] += deviation * deviation;
        }
    }
    for variance in &mut variances {
        *variance /= n;
    }
    variances
}

/// Axis with the largest variance. Ties go to the lowest axis index.
pub fn max_variance_axis(products: &[Product]) -> usize {
    let variances = axis_variances(products);
    let mut best = 0;
    for axis in 1..DIMENSIONS {
        if variances[axis] > variances[best] {
            best = axis;
        }
    }
    best
}
