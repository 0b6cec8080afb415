// src/core/config.rs

use crate::core::common::OrthosError;
use crate::core::indexing::kdtree::SplitPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest number of significant decimals an `f64` can meaningfully carry.
const MAX_COORDINATE_PRECISION: usize = 17;

/// Runtime configuration for loading a catalog and answering radius queries.
///
/// Every field has a default, so a TOML file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the number of records read from an input file.
    pub max_products: usize,
    /// Radius used when the caller does not supply one.
    pub default_radius: f64,
    pub split_policy: SplitPolicy,
    /// Decimal places written for each coordinate in CSV output.
    pub coordinate_precision: usize,
    /// Skip malformed input records with a warning instead of failing the load.
    pub skip_malformed: bool,
    /// Leave the target product out of recommendation lists.
    pub exclude_target: bool,
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    max_products: Option<usize>,
    default_radius: Option<f64>,
    split_policy: Option<SplitPolicy>,
    coordinate_precision: Option<usize>,
    skip_malformed: Option<bool>,
    exclude_target: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of products read from input
    pub fn max_products(mut self, max: usize) -> Self {
        self.max_products = Some(max);
        self
    }

    /// Sets the fallback query radius
    pub fn default_radius(mut self, radius: f64) -> Self {
        self.default_radius = Some(radius);
        self
    }

    /// Sets the axis selection policy used to build the index
    pub fn split_policy(mut self, policy: SplitPolicy) -> Self {
        self.split_policy = Some(policy);
        self
    }

    pub fn coordinate_precision(mut self, precision: usize) -> Self {
        self.coordinate_precision = Some(precision);
        self
    }

    pub fn skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = Some(skip);
        self
    }

    pub fn exclude_target(mut self, exclude: bool) -> Self {
        self.exclude_target = Some(exclude);
        self
    }

    /// Builds the Config instance with validation
    pub fn build(self) -> Result<Config, OrthosError> {
        let defaults = Config::default();
        let config = Config {
            max_products: self.max_products.unwrap_or(defaults.max_products),
            default_radius: self.default_radius.unwrap_or(defaults.default_radius),
            split_policy: self.split_policy.unwrap_or(defaults.split_policy),
            coordinate_precision: self
                .coordinate_precision
                .unwrap_or(defaults.coordinate_precision),
            skip_malformed: self.skip_malformed.unwrap_or(defaults.skip_malformed),
            exclude_target: self.exclude_target.unwrap_or(defaults.exclude_target),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_products: 1000,
            default_radius: 0.5,
            split_policy: SplitPolicy::Variance,
            coordinate_precision: 6,
            skip_malformed: false,
            exclude_target: true,
        }
    }
}

impl Config {
    /// Creates a new ConfigBuilder for fluent configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), OrthosError> {
        if self.max_products == 0 {
            return Err(OrthosError::Configuration(
                "max_products must be greater than 0".to_string(),
            ));
        }

        if !self.default_radius.is_finite() || self.default_radius < 0.0 {
            return Err(OrthosError::Configuration(format!(
                "default_radius must be a finite, non-negative number (got {})",
                self.default_radius
            )));
        }

        if self.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(OrthosError::Configuration(format!(
                "coordinate_precision must be at most {}",
                MAX_COORDINATE_PRECISION
            )));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `OrthosError::Configuration` if the file cannot be parsed or fails
    /// validation, and `OrthosError::Io` for any other read failure.
    pub fn load_from_file(path: &Path) -> Result<Self, OrthosError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    OrthosError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;

                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(OrthosError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path, falling back to the
    /// defaults when no path is given.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, OrthosError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
