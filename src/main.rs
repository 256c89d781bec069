// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (timestamped lines on stdout)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = some categories failed, 2 = error)
//
// Rust concepts used:
// - async/await: The browser is driven through async calls
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod browser;       // src/browser/ - headless browser + page loading
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - category list + crawl loop
mod extract;       // src/extract/ - HTML -> Product records
mod logging;       // src/logging.rs - tracing setup
mod output;        // src/output/ - CSV files

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;

use browser::LoaderConfig;
use cli::{Cli, Commands};
use crawl::{CategoryOutcome, CrawlConfig, CrawlSummary, FailurePolicy};
use output::CsvSink;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = everything written
//   Ok(1) = some categories failed (only with --keep-going)
//   Err   = fatal error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init()?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        Commands::Crawl {
            output_dir,
            base_url,
            categories,
            click_delay_ms,
            max_clicks,
            keep_going,
            json,
        } => {
            let config = CrawlConfig {
                base_url: crawl::parse_base_url(&base_url)?,
                loader: LoaderConfig {
                    click_delay: Duration::from_millis(click_delay_ms),
                    max_clicks,
                },
                policy: if keep_going {
                    FailurePolicy::KeepGoing
                } else {
                    FailurePolicy::FailFast
                },
            };
            handle_crawl(&config, &categories, &output_dir, json).await
        }
        Commands::Extract { html_file, json } => handle_extract(&html_file, json),
        Commands::Categories => handle_categories(),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    config: &CrawlConfig,
    categories: &[String],
    output_dir: &Path,
    json: bool,
) -> Result<i32> {
    // Check the cheap things before starting a browser
    let jobs = crawl::select_categories(categories)?;
    if !output_dir.is_dir() {
        anyhow::bail!("Output directory {} does not exist", output_dir.display());
    }

    tracing::info!(
        categories = jobs.len(),
        output_dir = %output_dir.display(),
        "starting crawl"
    );

    let mut sink = CsvSink::new(output_dir);
    let summary = crawl::run(&jobs, &mut sink, config).await?;

    print_summary(&summary, json)?;

    if summary.failed_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'extract' subcommand
fn handle_extract(html_file: &Path, json: bool) -> Result<i32> {
    let html = std::fs::read_to_string(html_file)
        .with_context(|| format!("Failed to read {}", html_file.display()))?;

    let document = scraper::Html::parse_document(&html);
    let products = extract::extract_products(&document)
        .with_context(|| format!("Failed to extract products from {}", html_file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    } else {
        output::write_products(std::io::stdout().lock(), &products)?;
    }

    Ok(0)
}

// Handles the 'categories' subcommand
fn handle_categories() -> Result<i32> {
    let base = crawl::parse_base_url(crawl::BASE_URL)?;

    for job in crawl::CATEGORIES {
        println!("{:<12} {}", job.name, job.url(&base)?);
    }

    Ok(0)
}

// Prints the run summary either as a table or JSON
fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("{:<12} {:<10} {:<50}", "CATEGORY", "PRODUCTS", "OUTPUT");
    println!("{}", "=".repeat(72));

    for report in &summary.categories {
        match &report.outcome {
            CategoryOutcome::Written { products, location } => {
                println!("{:<12} {:<10} {:<50}", report.category, products, location);
            }
            CategoryOutcome::Failed { error } => {
                println!("{:<12} {:<10} {:<50}", report.category, "FAILED", error);
            }
        }
    }

    println!();
    println!("Summary:");
    println!("   Categories: {}", summary.categories.len());
    println!("   Products:   {}", summary.product_count());
    println!("   Failed:     {}", summary.failed_count());

    Ok(())
}
