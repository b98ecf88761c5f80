//! Extraction strategies.
//!
//! Each strategy looks at a fetched page and either returns the article text
//! or declines. The [`Extractor`](crate::Extractor) tries them in order.

use url::Url;

use crate::parse::Document;
use crate::readability::{ReadabilityConfig, extract_readable_text};

/// A fetched page as seen by extraction strategies.
pub struct Page<'a> {
    pub url: &'a Url,
    pub html: &'a str,
    pub document: &'a Document,
}

/// One way of finding an article body in a page.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns the article text, or `None` if this strategy does not apply.
    fn attempt(&self, page: &Page<'_>) -> Option<String>;
}

/// Site-specific strategy: text of a known content container.
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with
/// newlines.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    selector: String,
    hosts: Vec<String>,
}

impl SelectorStrategy {
    /// Matches `selector` on every host.
    pub fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into(), hosts: Vec::new() }
    }

    /// Restricts the strategy to these hosts and their subdomains.
    pub fn for_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(|h| h.into().to_lowercase()).collect();
        self
    }

    fn applies_to(&self, url: &Url) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        let Some(host) = url.host_str().map(str::to_lowercase) else {
            return false;
        };
        self.hosts
            .iter()
            .any(|h| host == *h || host.strip_suffix(h.as_str()).is_some_and(|rest| rest.ends_with('.')))
    }
}

impl Default for SelectorStrategy {
    fn default() -> Self {
        Self::new("div#articleWrap")
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        &self.selector
    }

    fn attempt(&self, page: &Page<'_>) -> Option<String> {
        if !self.applies_to(page.url) {
            return None;
        }
        match page.document.select_first(&self.selector) {
            Ok(found) => found.map(|el| el.text_lines()).filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!(selector = %self.selector, error = %e, "skipping invalid site selector");
                None
            }
        }
    }
}

/// Generic fallback: readability-style heuristic extraction.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityStrategy {
    config: ReadabilityConfig,
}

impl ReadabilityStrategy {
    pub fn with_config(config: ReadabilityConfig) -> Self {
        Self { config }
    }
}

impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &str {
        "readability"
    }

    fn attempt(&self, page: &Page<'_>) -> Option<String> {
        extract_readable_text(page.html, &self.config)
    }
}

/// The default ordering: the site container first, then readability.
pub fn default_strategies() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![Box::new(SelectorStrategy::default()), Box::new(ReadabilityStrategy::default())]
}
