// src/output/mod.rs
// =============================================================================
// This module is where product batches leave the program.
//
// Submodules:
// - csv_file: Writes `<category>.csv` files (and CSV to any io::Write)
//
// The Sink trait is the boundary the crawler hands each finished category
// to. Tests use an in-memory sink; the CLI uses CsvSink.
// =============================================================================

mod csv_file;

use anyhow::Result;

use crate::extract::Product;

pub use csv_file::{write_products, CsvSink};

/// Somewhere to persist one category's products.
pub trait Sink {
    /// Persist `products` under the logical name `category`.
    ///
    /// Returns a human-readable location (a file path for CsvSink) for the
    /// run summary. When this returns Ok the data must already be durable.
    fn write_batch(&mut self, category: &str, products: &[Product]) -> Result<String>;
}
