// src/core/io/reader.rs

//! Reads products from the delimited `id,name,x,y,z` record format.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::core::common::OrthosError;
use crate::core::config::Config;
use crate::core::types::{Coordinates, Product, DIMENSIONS};

const MIN_FIELDS: usize = 2 + DIMENSIONS;

/// Reads products from the file at `path`. See [`parse_products`].
pub fn read_products(path: &Path, config: &Config) -> Result<Vec<Product>, OrthosError> {
    let file = File::open(path)?;
    let products = parse_products(BufReader::new(file), config)?;
    debug!(path = %path.display(), count = products.len(), "loaded products");
    Ok(products)
}

/// Parses products from a reader.
///
/// The first record is a header and is skipped. Blank lines are ignored. At most
/// `config.max_products` records are kept; the rest are counted and reported
/// with a warning. Malformed records fail the whole read unless
/// `config.skip_malformed` is set, in which case they are logged and skipped.
/// I/O failures always abort.
pub fn parse_products<R: Read>(reader: R, config: &Config) -> Result<Vec<Product>, OrthosError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut products = Vec::new();
    let mut over_capacity = 0usize;

    for result in csv_reader.records() {
        if let Ok(record) = &result {
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
        }
        if products.len() >= config.max_products {
            over_capacity += 1;
            continue;
        }

        match result.map_err(OrthosError::from).and_then(|r| parse_record(&r)) {
            Ok(product) => products.push(product),
            Err(e @ OrthosError::Io(_)) => return Err(e),
            Err(e) if config.skip_malformed => warn!("skipping malformed record: {}", e),
            Err(e) => return Err(e),
        }
    }

    if over_capacity > 0 {
        warn!(
            max_products = config.max_products,
            ignored = over_capacity,
            "input holds more records than max_products; extra records ignored"
        );
    }
    Ok(products)
}

/// Parses a single `id,name,x,y,z` record.
///
/// The identifier is the first field and the coordinates are the last three.
/// Quoted fields may hold any text. An unquoted name containing commas spans
/// several fields, which are joined back together.
pub fn parse_record(record: &StringRecord) -> Result<Product, OrthosError> {
    let line = record.position().map_or(0, |pos| pos.line() as usize);
    let parse_error = |message: String| OrthosError::Parsing { line, message };

    if record.len() < MIN_FIELDS {
        return Err(parse_error(format!(
            "expected {} fields, found {}",
            MIN_FIELDS,
            record.len()
        )));
    }

    let id = record.get(0).unwrap_or_default().trim();
    if id.is_empty() {
        return Err(parse_error("empty product identifier".to_string()));
    }

    let name_end = record.len() - DIMENSIONS;
    let name = record
        .iter()
        .skip(1)
        .take(name_end - 1)
        .collect::<Vec<_>>()
        .join(",");

    let mut coordinates: Coordinates = [0.0; DIMENSIONS];
    for (axis, raw) in record.iter().skip(name_end).enumerate() {
        coordinates[axis] = parse_coordinate(raw).map_err(parse_error)?;
    }

    Ok(Product::new(id, name.trim(), coordinates))
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid coordinate '{}': {}", raw, e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate '{}' is not finite", raw))
    }
}
