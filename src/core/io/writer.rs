// src/core/io/writer.rs

//! Serializes query results as delimited records or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::common::OrthosError;
use crate::core::recommend::Recommendation;
use crate::core::types::Product;

pub const PRODUCT_HEADER: [&str; 5] = ["id", "name", "x", "y", "z"];
pub const RECOMMENDATION_HEADER: [&str; 7] = ["id", "name", "x", "y", "z", "distance", "similarity"];

/// Opens `path` for writing, truncating any existing file.
pub fn create_output(path: &Path) -> Result<BufWriter<File>, OrthosError> {
    Ok(BufWriter::new(File::create(path)?))
}

fn fixed(value: f64, precision: usize) -> String {
    format!("{:.prec$}", value, prec = precision)
}

/// Writes products as `id,name,x,y,z` records under a fixed header, each
/// coordinate printed with `precision` decimals. Fields holding commas, quotes
/// or line breaks are quoted.
pub fn write_products_csv<W: Write>(
    out: W,
    products: &[&Product],
    precision: usize,
) -> Result<(), OrthosError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(PRODUCT_HEADER)?;
    for product in products {
        let [x, y, z] = product.coordinates;
        writer.write_record([
            product.id.clone(),
            product.name.clone(),
            fixed(x, precision),
            fixed(y, precision),
            fixed(z, precision),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes recommendations as CSV, extending the product record with the
/// distance to the target and the derived similarity.
pub fn write_recommendations_csv<W: Write>(
    out: W,
    recommendations: &[Recommendation],
    precision: usize,
) -> Result<(), OrthosError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(RECOMMENDATION_HEADER)?;
    for rec in recommendations {
        let [x, y, z] = rec.coordinates;
        writer.write_record([
            rec.id.clone(),
            rec.name.clone(),
            fixed(x, precision),
            fixed(y, precision),
            fixed(z, precision),
            fixed(rec.distance, precision),
            fixed(rec.similarity, precision),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes any serializable value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<(), OrthosError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
