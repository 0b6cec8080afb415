// src/core/types/mod.rs

use serde::{Deserialize, Serialize};

/// Number of spatial dimensions every product is embedded in (x, y, z).
pub const DIMENSIONS: usize = 3;

/// A position in the product space.
pub type Coordinates = [f64; DIMENSIONS];

/// A labeled point in 3D space.
///
/// Identifiers are expected to be unique within a product set, but nothing here
/// enforces it; duplicates are carried through the index like any other point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
        }
    }

    pub fn x(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn y(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn z(&self) -> f64 {
        self.coordinates[2]
    }
}
