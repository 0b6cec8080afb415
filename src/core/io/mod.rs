//! Adapters between the delimited text format and in-memory products.

pub mod reader;
pub mod writer;

pub use reader::{parse_products, parse_record, read_products};
pub use writer::{create_output, write_json, write_products_csv, write_recommendations_csv};
