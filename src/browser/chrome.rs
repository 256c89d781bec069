// src/browser/chrome.rs
// =============================================================================
// The real Renderer: a headless Chromium controlled over the DevTools
// protocol with the `chromiumoxide` crate.
//
// How chromiumoxide works:
// - Browser::launch() starts Chromium and returns (Browser, Handler)
// - The Handler is a Stream of protocol events that MUST be polled for the
//   connection to make progress, so we spawn a tokio task that drains it
// - A Page is one tab; we open a single tab and reuse it for every category
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use url::Url;

use super::{Locator, Renderer};

// "Visible" = the element takes up space on the page and isn't hidden by CSS
const IS_VISIBLE_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    return style.display !== 'none'
        && style.visibility !== 'hidden'
        && this.getClientRects().length > 0;
}"#;

/// A headless Chromium session with a single tab.
pub struct ChromeRenderer {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromeRenderer {
    /// Starts a headless Chromium and opens a blank tab.
    pub async fn launch() -> Result<Self> {
        // BrowserConfig defaults to headless mode
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| anyhow!("Invalid browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch Chromium")?;

        // Drain protocol events in the background
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to open a browser tab")?;

        tracing::debug!("headless browser session started");

        Ok(ChromeRenderer {
            browser,
            page,
            handler_task,
        })
    }
}

// Stop draining events once the session goes away, however that happens
impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    type Element = Element;

    async fn navigate(&mut self, url: &Url) -> Result<()> {
        self.page
            .goto(url.as_str())
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        Ok(())
    }

    async fn find(&mut self, locator: Locator) -> Result<Option<Element>> {
        // find_elements() gives an empty Vec when nothing matches, while
        // find_element() would turn "not found" into an error
        let mut matches = self
            .page
            .find_elements(locator.to_css())
            .await
            .with_context(|| format!("Failed to query {:?}", locator))?;

        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    async fn click(&mut self, element: &Element) -> Result<()> {
        element.click().await.context("Failed to click element")?;
        Ok(())
    }

    async fn is_displayed(&mut self, element: &Element) -> Result<bool> {
        let returns = element
            .call_js_fn(IS_VISIBLE_JS, false)
            .await
            .context("Failed to check element visibility")?;

        Ok(returns
            .result
            .value
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    async fn page_source(&mut self) -> Result<String> {
        self.page
            .content()
            .await
            .context("Failed to read page HTML")
    }

    // Closes the browser and waits for the process to exit
    async fn close(&mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .context("Failed to close browser")?;
        self.browser
            .wait()
            .await
            .context("Failed to wait for browser exit")?;

        tracing::debug!("headless browser session closed");
        Ok(())
    }
}
