// src/crawl/orchestrator.rs
// =============================================================================
// This module runs the crawl: one category after another, through the same
// browser session.
//
// For each category, in CATEGORIES order:
// 1. Join the base URL with the category path
// 2. Load the page fully (browser::load_page)
// 3. Pull out the products (extract::extract_products)
// 4. Hand them to the sink, which writes `<category>.csv`
//
// Failure policy:
// - FailFast (default): the first failing category stops the run. Files for
//   earlier categories are already on disk; later ones are never attempted.
// - KeepGoing: log the failure, record it in the summary, move on.
//
// Rust concepts:
// - Generics with trait bounds: <R: Renderer, S: Sink>
// - &mut borrows: the session is lent to each step, never stored globally
// =============================================================================

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use super::categories::CategoryJob;
use crate::browser::{load_page, ChromeRenderer, LoaderConfig, Renderer};
use crate::extract::extract_products;
use crate::output::Sink;

/// What to do when a category fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failure
    #[default]
    FailFast,
    /// Record the failure and continue with the next category
    KeepGoing,
}

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    pub loader: LoaderConfig,
    pub policy: FailurePolicy,
}

/// How one category went.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryOutcome {
    Written { products: usize, location: String },
    Failed { error: String },
}

/// One line of the run summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: CategoryOutcome,
}

impl CategoryReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CategoryOutcome::Written { .. })
    }
}

/// Everything that happened during a run, in crawl order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrawlSummary {
    pub categories: Vec<CategoryReport>,
}

impl CrawlSummary {
    pub fn failed_count(&self) -> usize {
        self.categories.iter().filter(|r| !r.is_ok()).count()
    }

    pub fn product_count(&self) -> usize {
        self.categories
            .iter()
            .map(|r| match r.outcome {
                CategoryOutcome::Written { products, .. } => products,
                CategoryOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

// Launches a headless browser, crawls `jobs`, and always closes the browser
pub async fn run<S: Sink>(
    jobs: &[CategoryJob],
    sink: &mut S,
    config: &CrawlConfig,
) -> Result<CrawlSummary> {
    let mut renderer = ChromeRenderer::launch().await?;
    crawl_then_close(&mut renderer, sink, jobs, config).await
}

// Crawls through `renderer`, then closes it whether the crawl worked or not
//
// The crawl result wins over a close error: if the crawl failed we report
// that, and a failed close after a good crawl is only a warning.
async fn crawl_then_close<R: Renderer, S: Sink>(
    renderer: &mut R,
    sink: &mut S,
    jobs: &[CategoryJob],
    config: &CrawlConfig,
) -> Result<CrawlSummary> {
    let result = crawl_categories(renderer, sink, jobs, config).await;

    if let Err(e) = renderer.close().await {
        tracing::warn!(error = %format!("{:#}", e), "browser did not shut down cleanly");
    }

    result
}

// Crawls every job through one Renderer session
//
// Parameters:
//   renderer: the browser session, shared by all categories
//   sink: where finished batches go
//   jobs: categories to crawl, in order
//   config: base URL, pagination settings, failure policy
//
// Returns: a summary with one report per attempted category, or (FailFast)
//          the first error
pub async fn crawl_categories<R: Renderer, S: Sink>(
    renderer: &mut R,
    sink: &mut S,
    jobs: &[CategoryJob],
    config: &CrawlConfig,
) -> Result<CrawlSummary> {
    let mut summary = CrawlSummary::default();

    for job in jobs {
        let url = job.url(&config.base_url)?;
        tracing::info!(category = job.name, %url, "crawling category");

        let outcome = match crawl_one(renderer, sink, job, &url, config).await {
            Ok((products, location)) => CategoryOutcome::Written { products, location },
            Err(e) => match config.policy {
                FailurePolicy::FailFast => return Err(e),
                FailurePolicy::KeepGoing => {
                    let error = format!("{:#}", e);
                    tracing::error!(category = job.name, %error, "category failed");
                    CategoryOutcome::Failed { error }
                }
            },
        };

        summary.categories.push(CategoryReport {
            category: job.name.to_string(),
            url: url.to_string(),
            outcome,
        });
    }

    Ok(summary)
}

// Load, extract, persist - for a single category
async fn crawl_one<R: Renderer, S: Sink>(
    renderer: &mut R,
    sink: &mut S,
    job: &CategoryJob,
    url: &Url,
    config: &CrawlConfig,
) -> Result<(usize, String)> {
    let document = load_page(renderer, url, &config.loader)
        .await
        .with_context(|| format!("Failed to load category '{}' from {}", job.name, url))?;

    let products = extract_products(&document)
        .with_context(|| format!("Failed to extract products for category '{}'", job.name))?;

    let location = sink
        .write_batch(job.name, &products)
        .with_context(|| format!("Failed to save category '{}'", job.name))?;

    Ok((products.len(), location))
}
