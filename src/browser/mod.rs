// src/browser/mod.rs
// =============================================================================
// This module talks to the browser that renders the category pages.
//
// The product lists on the test site are filled in by JavaScript and only
// show everything after you press "more" a few times, so we need a real
// browser rather than a plain HTTP fetch.
//
// Submodules:
// - chrome: The real implementation, a headless Chromium via chromiumoxide
// - loader: Drives a page to its fully-loaded state (cookies + "more" button)
// - fake (tests only): A scripted Renderer so tests don't need a browser
//
// Rust concepts:
// - Traits: The Renderer trait is the seam between our logic and the browser
// - Associated types: Each Renderer decides what an "element" is
// - async-trait: Stable Rust way to put async fns in a trait we use generically
// =============================================================================

mod chrome;
mod loader;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

pub use chrome::ChromeRenderer;
pub use loader::{load_page, LoaderConfig};

/// How to look up an element on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// Match by a single class name, e.g. `acceptCookies`
    Class(&'static str),
    /// Match by a CSS selector, e.g. `.ecomerce-items-scroll-more`
    Css(&'static str),
}

impl Locator {
    /// The locator written as a CSS selector.
    pub fn to_css(self) -> String {
        match self {
            Locator::Class(name) => format!(".{}", name),
            Locator::Css(selector) => selector.to_string(),
        }
    }
}

/// A browser session that can render pages and poke at their elements.
///
/// One session is created for the whole crawl and handed to the page loader
/// by `&mut` reference for each category.
///
/// `find` returns `Ok(None)` when nothing matches. An `Err` always means the
/// session itself is in trouble (navigation failed, browser went away...).
#[async_trait]
pub trait Renderer: Send {
    type Element: Send + Sync;

    /// Navigate to `url` and wait for the page to load.
    async fn navigate(&mut self, url: &Url) -> Result<()>;

    /// Look up the first element matching `locator`.
    async fn find(&mut self, locator: Locator) -> Result<Option<Self::Element>>;

    /// Click an element previously returned by `find`.
    async fn click(&mut self, element: &Self::Element) -> Result<()>;

    /// Whether the element is currently rendered and visible.
    async fn is_displayed(&mut self, element: &Self::Element) -> Result<bool>;

    /// The current DOM serialized as HTML.
    async fn page_source(&mut self) -> Result<String>;

    /// Shut the session down. Nothing else is called on it afterwards.
    async fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_locator_becomes_selector() {
        assert_eq!(Locator::Class("acceptCookies").to_css(), ".acceptCookies");
    }

    #[test]
    fn test_css_locator_is_kept() {
        assert_eq!(
            Locator::Css(".ecomerce-items-scroll-more").to_css(),
            ".ecomerce-items-scroll-more"
        );
    }
}
