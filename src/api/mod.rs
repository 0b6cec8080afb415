//! Public API module for orthos
//!
//! The main entry point is [`ProductCatalog`], which owns a product set and the
//! KD-Tree built over it and answers radius queries by product identifier.

pub mod catalog;

pub use catalog::ProductCatalog;
