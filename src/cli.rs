// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl:      Crawl the category pages and write one CSV per category
// - extract:    Run the product extractor on a saved HTML page (no browser)
// - categories: List the categories and their URLs
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::crawl::BASE_URL;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "ecommerce-scraper",
    version = "0.1.0",
    about = "Crawl the webscraper.io e-commerce test site into CSV files",
    long_about = "ecommerce-scraper opens each product category of the webscraper.io \
                  e-commerce test site in a headless browser, loads every item behind \
                  the \"more\" button, and saves the products as <category>.csv."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the categories and write one CSV file per category
    ///
    /// Example: ecommerce-scraper crawl --category phones --output-dir out
    Crawl {
        /// Directory for the <category>.csv files
        ///
        /// Defaults to the parent of the current directory
        #[arg(long, default_value = "..")]
        output_dir: PathBuf,

        /// Root URL the category paths are joined onto
        #[arg(long, default_value = BASE_URL)]
        base_url: String,

        /// Only crawl this category (repeat for several)
        ///
        /// Categories still run in their usual order
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Pause after each "more" click, in milliseconds
        #[arg(long, default_value_t = 50)]
        click_delay_ms: u64,

        /// Stop clicking "more" after this many clicks per page
        ///
        /// By default we click until the button disappears
        #[arg(long)]
        max_clicks: Option<usize>,

        /// Keep crawling the remaining categories when one fails
        #[arg(long)]
        keep_going: bool,

        /// Print the run summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Extract products from a saved HTML page and print them
    ///
    /// Example: ecommerce-scraper extract phones.html --json
    Extract {
        /// Path to the HTML file
        html_file: PathBuf,

        /// Output JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// List the categories and their URLs
    Categories,
}
