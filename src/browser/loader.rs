// src/browser/loader.rs
// =============================================================================
// This module drives one category page to its fully-loaded state.
//
// How it works:
// 1. Navigate to the category URL
// 2. If a cookie banner is shown, click "accept" once
// 3. If a "more" button is shown, keep clicking it (with a short pause for
//    the new items to be injected) until the site hides it
// 4. Grab the final HTML and parse it with `scraper`
//
// Missing buttons are normal: not every page shows the cookie banner, and
// short categories don't need pagination. Those cases are logged and
// skipped. Any other browser error is passed up to the caller.
//
// Rust concepts:
// - Generics: load_page works with any R: Renderer (real browser or fake)
// - Option: find() returns Some(element) or None instead of throwing
// =============================================================================

use anyhow::Result;
use scraper::Html;
use std::time::Duration;
use url::Url;

use super::{Locator, Renderer};

/// Cookie banner "accept" button.
pub const ACCEPT_COOKIES: Locator = Locator::Class("acceptCookies");

/// The "more" button under the product grid (the typo is the site's).
pub const LOAD_MORE: Locator = Locator::Css(".ecomerce-items-scroll-more");

/// Knobs for the "more" button loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Pause after each click so the site can inject the next batch
    pub click_delay: Duration,
    /// Optional cap on clicks per page.
    ///
    /// None means click until the button disappears, which never ends if a
    /// page keeps the button visible forever.
    pub max_clicks: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            click_delay: Duration::from_millis(50),
            max_clicks: None,
        }
    }
}

// Loads a category page and returns the fully-expanded document
//
// Parameters:
//   renderer: the shared browser session (borrowed mutably for this page)
//   url: absolute URL of the category page
//   config: pagination settings
//
// Returns: the parsed HTML after all "more" clicks, or the first browser error
pub async fn load_page<R: Renderer>(
    renderer: &mut R,
    url: &Url,
    config: &LoaderConfig,
) -> Result<Html> {
    renderer.navigate(url).await?;

    match renderer.find(ACCEPT_COOKIES).await? {
        Some(button) => renderer.click(&button).await?,
        None => tracing::info!("Accept cookie button not found"),
    }

    match renderer.find(LOAD_MORE).await? {
        Some(button) => {
            let clicks = expand_listing(renderer, &button, config).await?;
            tracing::debug!(clicks, %url, "listing expanded");
        }
        None => tracing::info!("More button not found"),
    }

    let source = renderer.page_source().await?;
    Ok(Html::parse_document(&source))
}

// Clicks "more" while it stays visible; returns how many clicks it took
async fn expand_listing<R: Renderer>(
    renderer: &mut R,
    button: &R::Element,
    config: &LoaderConfig,
) -> Result<usize> {
    let mut clicks = 0;

    while renderer.is_displayed(button).await? {
        if let Some(max) = config.max_clicks {
            if clicks >= max {
                tracing::warn!(
                    max,
                    "More button still visible after click limit, giving up"
                );
                break;
            }
        }

        renderer.click(button).await?;
        clicks += 1;

        tokio::time::sleep(config.click_delay).await;
    }

    Ok(clicks)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `&mut R` instead of a global browser?
//    - The crawler owns the one browser session for the whole run
//    - Each call borrows it mutably, so only one page load can use it at a time
//    - The compiler enforces this - no locks or global state needed
//
// 2. What is `R::Element`?
//    - An associated type: each Renderer picks its own element handle
//    - ChromeRenderer uses chromiumoxide::Element
//    - The test fake uses a tiny enum
//
// 3. Why is there no limit on clicks by default?
//    - The site hides the "more" button once everything is loaded
//    - A page that never hides it would loop forever, so --max-clicks exists
//      as an opt-in safety net
//
// 4. What does tokio::time::sleep do here?
//    - Gives the page's JavaScript time to fetch and insert the next items
//    - It's an async sleep, so the browser's event task keeps running
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeRenderer;

    const PAGE: &str = "<html><body><div class=\"product-wrapper\">x</div></body></html>";

    fn url() -> Url {
        Url::parse("https://webscraper.io/test-sites/e-commerce/more/phones").unwrap()
    }

    fn fast() -> LoaderConfig {
        LoaderConfig {
            click_delay: Duration::from_millis(0),
            max_clicks: None,
        }
    }

    #[tokio::test]
    async fn test_clicks_more_until_hidden() {
        for k in [1, 3, 7] {
            let mut renderer = FakeRenderer::new(PAGE).with_load_more(k);

            load_page(&mut renderer, &url(), &fast()).await.unwrap();

            assert_eq!(renderer.load_more_clicks, k);
        }
    }

    #[tokio::test]
    async fn test_never_clicks_hidden_button() {
        let mut renderer = FakeRenderer::new(PAGE).with_load_more(0);

        load_page(&mut renderer, &url(), &fast()).await.unwrap();

        assert_eq!(renderer.load_more_clicks, 0);
    }

    #[tokio::test]
    async fn test_accepts_cookies_once() {
        let mut renderer = FakeRenderer::new(PAGE)
            .with_cookie_banner()
            .with_load_more(2);

        load_page(&mut renderer, &url(), &fast()).await.unwrap();

        assert_eq!(renderer.cookie_clicks, 1);
        assert_eq!(renderer.load_more_clicks, 2);
    }

    #[tokio::test]
    async fn test_missing_controls_are_not_errors() {
        let mut renderer = FakeRenderer::new(PAGE);

        let document = load_page(&mut renderer, &url(), &fast()).await.unwrap();

        assert_eq!(renderer.visited, vec![url()]);
        assert_eq!(renderer.cookie_clicks, 0);
        assert_eq!(renderer.load_more_clicks, 0);
        assert_eq!(
            document.root_element().html(),
            Html::parse_document(PAGE).root_element().html()
        );
    }

    #[tokio::test]
    async fn test_click_cap_stops_loop() {
        // A misbehaving page: the button never hides
        let mut renderer = FakeRenderer::new(PAGE).with_load_more(usize::MAX);
        let config = LoaderConfig {
            max_clicks: Some(5),
            ..fast()
        };

        load_page(&mut renderer, &url(), &config).await.unwrap();

        assert_eq!(renderer.load_more_clicks, 5);
    }

    #[tokio::test]
    async fn test_navigation_failure_propagates() {
        let mut renderer = FakeRenderer::new(PAGE).failing_navigation();

        let result = load_page(&mut renderer, &url(), &fast()).await;

        assert!(result.is_err());
        assert_eq!(renderer.load_more_clicks, 0);
    }

    #[test]
    fn test_default_config_matches_site_timing() {
        let config = LoaderConfig::default();
        assert_eq!(config.click_delay, Duration::from_millis(50));
        assert_eq!(config.max_clicks, None);
    }
}
