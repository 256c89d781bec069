// src/output/csv_file.rs
// =============================================================================
// CSV output for product batches.
//
// File layout:
//   title,description,price,rating,num_of_reviews
//   Nokia 123,"7 day battery",24.99,3,11
//   ...
//
// We write the header ourselves instead of letting csv derive it from the
// first record, so an empty category still gets a header-only file.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use super::Sink;
use crate::extract::Product;

/// Writes each batch to `<dir>/<category>.csv`, replacing any old file.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvSink { dir: dir.into() }
    }

    /// Where the file for `category` goes.
    pub fn path_for(&self, category: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", category))
    }
}

impl Sink for CsvSink {
    fn write_batch(&mut self, category: &str, products: &[Product]) -> Result<String> {
        let path = self.path_for(category);

        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_products(file, products)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            category,
            products = products.len(),
            path = %path.display(),
            "wrote category"
        );

        Ok(path.display().to_string())
    }
}

// Writes a header row plus one row per product, then flushes
//
// Works with any io::Write: a File for the crawler, stdout for `extract`.
pub fn write_products<W: Write>(writer: W, products: &[Product]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(Product::FIELDS)?;
    for product in products {
        csv_writer.serialize(product)?;
    }

    // Flush explicitly: dropping the writer would swallow I/O errors
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn nokia() -> Product {
        Product {
            title: "Nokia 123".to_string(),
            description: "7 day battery, black".to_string(),
            price: 24.99,
            rating: 3,
            num_of_reviews: 11,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut buffer = Vec::new();
        let iphone = Product {
            title: "Iphone".to_string(),
            description: "Black".to_string(),
            price: 899.0,
            rating: 1,
            num_of_reviews: 0,
        };

        write_products(&mut buffer, &[nokia(), iphone]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "title,description,price,rating,num_of_reviews\n\
             Nokia 123,\"7 day battery, black\",24.99,3,11\n\
             Iphone,Black,899.0,1,0\n"
        );
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let mut buffer = Vec::new();
        write_products(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "title,description,price,rating,num_of_reviews\n"
        );
    }

    #[test]
    fn test_sink_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());

        let location = sink.write_batch("phones", &[nokia()]).unwrap();

        let path = dir.path().join("phones.csv");
        assert_eq!(location, path.display().to_string());
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_sink_overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());

        sink.write_batch("touch", &[nokia(), nokia(), nokia()]).unwrap();
        sink.write_batch("touch", &[nokia()]).unwrap();

        let contents = fs::read_to_string(sink.path_for("touch")).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_sink_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("does-not-exist"));

        assert!(sink.write_batch("home", &[nokia()]).is_err());
    }
}
