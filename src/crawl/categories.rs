// src/crawl/categories.rs
// =============================================================================
// The fixed list of category pages we crawl, and how to turn each relative
// path into an absolute URL.
//
// The order of CATEGORIES is the crawl order.
// =============================================================================

use anyhow::{anyhow, bail, Result};
use url::Url;

/// Root of the test site. Category paths are joined onto this.
pub const BASE_URL: &str = "https://webscraper.io/";

/// One unit of crawl work: output name + page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryJob {
    /// Used as the output file stem (`phones` -> `phones.csv`)
    pub name: &'static str,
    /// Path relative to BASE_URL
    pub path: &'static str,
}

pub const CATEGORIES: &[CategoryJob] = &[
    CategoryJob {
        name: "home",
        path: "test-sites/e-commerce/more/",
    },
    CategoryJob {
        name: "computers",
        path: "test-sites/e-commerce/more/computers",
    },
    CategoryJob {
        name: "laptops",
        path: "test-sites/e-commerce/more/computers/laptops",
    },
    CategoryJob {
        name: "tablets",
        path: "test-sites/e-commerce/more/computers/tablets",
    },
    CategoryJob {
        name: "phones",
        path: "test-sites/e-commerce/more/phones",
    },
    CategoryJob {
        name: "touch",
        path: "test-sites/e-commerce/more/phones/touch",
    },
];

impl CategoryJob {
    /// Absolute URL of this category under `base`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        base.join(self.path)
            .map_err(|e| anyhow!("Cannot join '{}' onto {}: {}", self.path, base, e))
    }
}

// Parses the base URL given on the command line
//
// A base without a trailing slash would make Url::join drop its last path
// segment ("https://host/shop" + "x" = "https://host/x"), so we add one.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut base = Url::parse(raw).map_err(|e| anyhow!("Invalid base URL '{}': {}", raw, e))?;

    if base.cannot_be_a_base() {
        bail!("Base URL '{}' cannot have paths joined onto it", raw);
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base)
}

// Picks the jobs to run
//
// No names = every category. Otherwise the named ones, still in CATEGORIES
// order. An unknown name is an error so a typo doesn't silently skip work.
pub fn select_categories(names: &[String]) -> Result<Vec<CategoryJob>> {
    if names.is_empty() {
        return Ok(CATEGORIES.to_vec());
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !CATEGORIES.iter().any(|job| job.name == name.as_str()))
    {
        let known: Vec<_> = CATEGORIES.iter().map(|job| job.name).collect();
        bail!(
            "Unknown category '{}' (expected one of: {})",
            unknown,
            known.join(", ")
        );
    }

    Ok(CATEGORIES
        .iter()
        .filter(|job| names.iter().any(|name| name == job.name))
        .copied()
        .collect())
}
