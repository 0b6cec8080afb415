// src/api/catalog.rs

use std::path::Path;

use tracing::info;

use crate::core::common::OrthosError;
use crate::core::config::Config;
use crate::core::indexing::kdtree::{build_kdtree, find_within_radius, KdTree};
use crate::core::io::read_products;
use crate::core::recommend::{recommend, Recommendation};
use crate::core::types::Product;

/// A loaded product set together with the KD-Tree built over it.
///
/// The catalog resolves query targets by identifier; the tree itself only ever
/// sees coordinates. When identifiers repeat, lookups resolve to the first
/// product in input order.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: KdTree,
    config: Config,
}

impl ProductCatalog {
    /// Builds a catalog over `products` using the split policy from `config`.
    pub fn new(products: Vec<Product>, config: Config) -> Self {
        let index = build_kdtree(products.clone(), config.split_policy);
        info!(
            products = products.len(),
            height = index.height(),
            policy = ?config.split_policy,
            "product catalog indexed"
        );
        Self {
            products,
            index,
            config,
        }
    }

    /// Reads products from `path` and indexes them.
    pub fn load(path: &Path, config: Config) -> Result<Self, OrthosError> {
        let products = read_products(path, &config)?;
        Ok(Self::new(products, config))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn index(&self) -> &KdTree {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by identifier.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Every product within `radius` of the product identified by `id`,
    /// including that product itself. Order is unspecified.
    ///
    /// # Errors
    ///
    /// `OrthosError::NotFound` for an unknown identifier and
    /// `OrthosError::InvalidInput` for a negative or non-finite radius.
    pub fn within_radius(&self, id: &str, radius: f64) -> Result<Vec<&Product>, OrthosError> {
        let target = self.require(id)?;
        validate_radius(radius)?;
        Ok(find_within_radius(&self.index, &target.coordinates, radius))
    }

    /// Products near the one identified by `id`, closest first, honouring
    /// `exclude_target` from the configuration.
    ///
    /// # Errors
    ///
    /// Same as [`within_radius`](Self::within_radius).
    pub fn recommend(&self, id: &str, radius: f64) -> Result<Vec<Recommendation>, OrthosError> {
        let target = self.require(id)?;
        validate_radius(radius)?;
        Ok(recommend(&self.index, target, radius, self.config.exclude_target))
    }

    fn require(&self, id: &str) -> Result<&Product, OrthosError> {
        self.find(id)
            .ok_or_else(|| OrthosError::NotFound(format!("product with id '{}'", id)))
    }
}

fn validate_radius(radius: f64) -> Result<(), OrthosError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(OrthosError::InvalidInput {
            message: format!("radius must be a finite, non-negative number (got {})", radius),
        })
    }
}
