use url::Url;

use crate::fetch::{FetchConfig, fetch_url, parse_article_url};
use crate::parse::Document;
use crate::strategy::{ExtractionStrategy, Page, default_strategies};
use crate::{GistError, Result};

/// Articles shorter than this many characters are not summarized.
pub const MIN_CONTENT_CHARS: usize = 300;

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// HTTP settings for the single article fetch
    pub fetch: FetchConfig,
    /// Minimum extracted length in characters
    pub min_content_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { fetch: FetchConfig::default(), min_content_chars: MIN_CONTENT_CHARS }
    }
}

/// The extracted article body for one pipeline run.
///
/// Only constructed by [`Extractor`], so `text` always satisfies the
/// configured minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    url: String,
    text: String,
}

impl SourceDocument {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the body in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fetches a page and pulls out the article body.
///
/// Strategies run in order against the one fetched document; the first
/// non-empty result wins.
pub struct Extractor {
    config: ExtractConfig,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Site container first, readability fallback second.
    pub fn new(config: ExtractConfig) -> Self {
        Self::with_strategies(config, default_strategies())
    }

    pub fn with_strategies(config: ExtractConfig, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { config, strategies }
    }

    /// Fetches `url` and extracts its article body.
    ///
    /// # Errors
    ///
    /// Extraction-kind errors for network, status and parse failures;
    /// [`GistError::ContentTooShort`] when the body is under the minimum.
    pub async fn extract(&self, url: &str) -> Result<SourceDocument> {
        let html = fetch_url(url, &self.config.fetch).await?;
        self.extract_from_html(url, &html)
    }

    /// Extracts the article body from already-fetched HTML.
    pub fn extract_from_html(&self, url: &str, html: &str) -> Result<SourceDocument> {
        let parsed_url: Url = parse_article_url(url)?;
        let document = Document::parse(html);
        if let Some(title) = document.title() {
            tracing::debug!(url, title = %title, "parsed article page");
        }
        let page = Page { url: &parsed_url, html, document: &document };

        let text = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let text = strategy.attempt(&page)?;
                tracing::info!(strategy = strategy.name(), chars = text.chars().count(), "extracted article text");
                Some(text)
            })
            .ok_or_else(|| {
                tracing::warn!(url, "no extraction strategy produced text");
                GistError::Unreachable
            })?;

        let length = text.chars().count();
        if length < self.config.min_content_chars {
            tracing::warn!(length, minimum = self.config.min_content_chars, "article text too short");
            return Err(GistError::ContentTooShort { length, minimum: self.config.min_content_chars });
        }

        Ok(SourceDocument { url: url.to_string(), text })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}
