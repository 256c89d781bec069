// src/browser/fake.rs
// A scripted Renderer for tests: serves canned HTML, pretends to have a
// cookie banner and a "more" button, and records every interaction.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;

use super::loader::{ACCEPT_COOKIES, LOAD_MORE};
use super::{Locator, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeElement {
    CookieButton,
    MoreButton,
}

pub(crate) struct FakeRenderer {
    default_page: String,
    pages: HashMap<String, String>,
    failing_paths: Vec<String>,
    fail_all_navigation: bool,
    fail_close: bool,
    cookie_banner: bool,
    // None = no "more" button; Some(k) = visible for exactly k clicks
    load_more_visible_for: Option<usize>,
    clicks_on_current_page: usize,
    current: Option<Url>,

    pub visited: Vec<Url>,
    pub cookie_clicks: usize,
    pub load_more_clicks: usize,
    pub closed: bool,
}

impl FakeRenderer {
    pub fn new(default_page: &str) -> Self {
        FakeRenderer {
            default_page: default_page.to_string(),
            pages: HashMap::new(),
            failing_paths: Vec::new(),
            fail_all_navigation: false,
            fail_close: false,
            cookie_banner: false,
            load_more_visible_for: None,
            clicks_on_current_page: 0,
            current: None,
            visited: Vec::new(),
            cookie_clicks: 0,
            load_more_clicks: 0,
            closed: false,
        }
    }

    pub fn with_cookie_banner(mut self) -> Self {
        self.cookie_banner = true;
        self
    }

    pub fn with_load_more(mut self, visible_for: usize) -> Self {
        self.load_more_visible_for = Some(visible_for);
        self
    }

    /// Serve `html` for URLs whose path is `path`.
    pub fn with_page(mut self, path: &str, html: &str) -> Self {
        self.pages.insert(path.to_string(), html.to_string());
        self
    }

    /// Navigation to `path` fails like a crashed tab would.
    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing_paths.push(path.to_string());
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_all_navigation = true;
        self
    }

    /// close() reports an error (the session still counts as closed).
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &Url) -> Result<()> {
        if self.closed {
            return Err(anyhow!("session already closed"));
        }
        if self.fail_all_navigation || self.failing_paths.iter().any(|p| p == url.path()) {
            return Err(anyhow!("net::ERR_CONNECTION_RESET at {}", url));
        }

        self.visited.push(url.clone());
        self.current = Some(url.clone());
        self.clicks_on_current_page = 0;
        Ok(())
    }

    async fn find(&mut self, locator: Locator) -> Result<Option<FakeElement>> {
        let found = if locator == ACCEPT_COOKIES && self.cookie_banner {
            Some(FakeElement::CookieButton)
        } else if locator == LOAD_MORE && self.load_more_visible_for.is_some() {
            Some(FakeElement::MoreButton)
        } else {
            None
        };
        Ok(found)
    }

    async fn click(&mut self, element: &FakeElement) -> Result<()> {
        match element {
            FakeElement::CookieButton => self.cookie_clicks += 1,
            FakeElement::MoreButton => {
                if !self.is_displayed(element).await? {
                    return Err(anyhow!("element not interactable"));
                }
                self.clicks_on_current_page += 1;
                self.load_more_clicks += 1;
            }
        }
        Ok(())
    }

    async fn is_displayed(&mut self, element: &FakeElement) -> Result<bool> {
        Ok(match element {
            FakeElement::CookieButton => self.cookie_banner,
            FakeElement::MoreButton => self
                .load_more_visible_for
                .map_or(false, |k| self.clicks_on_current_page < k),
        })
    }

    async fn page_source(&mut self) -> Result<String> {
        let path = self.current.as_ref().map(|u| u.path().to_string());
        Ok(path
            .and_then(|p| self.pages.get(&p).cloned())
            .unwrap_or_else(|| self.default_page.clone()))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        if self.fail_close {
            return Err(anyhow!("browser process did not exit"));
        }
        Ok(())
    }
}
