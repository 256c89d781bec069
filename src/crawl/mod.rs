// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the category pages.
//
// Features:
// - A fixed, ordered list of categories (home, computers, laptops, ...)
// - One shared headless browser session for the whole run
// - Strictly sequential: one category at a time, in list order
// - Fail-fast by default, or keep going with --keep-going
//
// Rust concepts:
// - Async programming: the browser calls are async
// - Modules: categories (what to crawl) vs orchestrator (how)
// =============================================================================

mod categories;
mod orchestrator;

// Re-export the pieces main.rs needs
pub use categories::{parse_base_url, select_categories, BASE_URL, CATEGORIES};
pub use orchestrator::{run, CategoryOutcome, CrawlConfig, CrawlSummary, FailurePolicy};
