//! Readability-style heuristic extraction.
//!
//! Used as the generic fallback when no site-specific container is found.
//! The page is cleaned, paragraphs score their ancestors, and the text of the
//! best-scoring container is returned with block boundaries as newlines.
//!
//! # Example
//!
//! ```rust
//! use gist_core::readability::{ReadabilityConfig, extract_readable_text};
//!
//! let para = "이번 조치는 지역 경제, 고용 시장, 그리고 물가 전반에 상당한 영향을 미칠 것으로 예상된다.";
//! let html = format!(
//!     "<html><body><nav>메뉴</nav><div class=\"news_body\"><p>{para}</p><p>{para}</p></div></body></html>"
//! );
//! let text = extract_readable_text(&html, &ReadabilityConfig::default()).unwrap();
//! assert!(text.contains("지역 경제"));
//! assert!(!text.contains("메뉴"));
//! ```

use std::collections::HashMap;

use scraper::ElementRef;

use crate::parse::{Document, Element};
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::scoring::{ScoreConfig, initial_score, link_density, paragraph_score};

/// Elements that start a new line in extracted text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "blockquote",
    "pre", "table", "tr", "td", "th", "figure", "figcaption",
];

/// Elements whose text contributes a paragraph score
const PARAGRAPH_TAGS: &str = "p, pre, td, blockquote";

/// Containers that are candidates in their own right
const CANDIDATE_TAGS: &str = "article, section, main, div, td, blockquote";

/// Configuration for heuristic extraction
#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Minimum score the top candidate must reach (default: 10.0)
    pub min_score: f64,
    /// Scoring weights
    pub score: ScoreConfig,
    /// Cleaning applied before scoring
    pub preprocess: PreprocessConfig,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self { min_score: 10.0, score: ScoreConfig::default(), preprocess: PreprocessConfig::default() }
    }
}

impl ReadabilityConfig {
    /// Creates a new builder for ReadabilityConfig.
    pub fn builder() -> ReadabilityConfigBuilder {
        ReadabilityConfigBuilder::new()
    }
}

/// Builder for ReadabilityConfig.
pub struct ReadabilityConfigBuilder {
    config: ReadabilityConfig,
}

impl ReadabilityConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Sets the minimum score threshold.
    pub fn min_score(mut self, value: f64) -> Self {
        self.config.min_score = value;
        self
    }

    /// Sets the minimum paragraph length that contributes to scoring.
    pub fn min_paragraph_chars(mut self, value: usize) -> Self {
        self.config.score.min_paragraph_chars = value;
        self
    }

    /// Sets whether to unwrap elements that look like page chrome.
    pub fn remove_unlikely(mut self, value: bool) -> Self {
        self.config.preprocess.remove_unlikely = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ReadabilityConfig {
        self.config
    }
}

impl Default for ReadabilityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A scored container
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Extract the main text of a page, or `None` when nothing scores high enough.
pub fn extract_readable_text(html: &str, config: &ReadabilityConfig) -> Option<String> {
    let cleaned = preprocess_html(html, &config.preprocess);
    let doc = Document::parse(&cleaned);

    let top = top_candidate(&doc, config)?;
    let text = block_text(&top.element);

    if text.trim().is_empty() { None } else { Some(text) }
}

fn top_candidate<'a>(doc: &'a Document, config: &ReadabilityConfig) -> Option<Candidate<'a>> {
    let mut candidates: HashMap<_, Candidate<'a>> = HashMap::new();

    let mut credit = |element: Element<'a>, amount: f64| {
        candidates
            .entry(element.inner().id())
            .or_insert_with(|| Candidate { element, score: initial_score(&element, &config.score) })
            .score += amount;
    };

    // Sectioning elements always qualify; other containers need a paragraph's worth of text.
    for element in doc.select(CANDIDATE_TAGS).unwrap_or_default() {
        let sectioning = matches!(element.tag_name().as_str(), "article" | "section" | "main");
        if sectioning || element.text().trim().chars().count() >= config.score.min_paragraph_chars {
            credit(element, 0.0);
        }
    }

    for paragraph in doc.select(PARAGRAPH_TAGS).unwrap_or_default() {
        let Some(score) = paragraph_score(&paragraph.text(), &config.score) else {
            continue;
        };
        if let Some(parent) = paragraph.parent() {
            credit(parent, score);
            if let Some(grandparent) = parent.parent() {
                credit(grandparent, score / 2.0);
            }
        }
    }

    // <br>-separated bodies have no <p>; their direct text scores the div itself.
    for div in doc.select("div").unwrap_or_default() {
        let Some(score) = paragraph_score(&direct_text(&div), &config.score) else {
            continue;
        };
        credit(div, score);
        if let Some(parent) = div.parent() {
            credit(parent, score / 2.0);
        }
    }

    let best = candidates
        .into_values()
        .filter(|c| !matches!(c.element.tag_name().as_str(), "html" | "body"))
        .map(|c| Candidate { score: c.score * (1.0 - link_density(&c.element)), ..c })
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))?;

    tracing::trace!(tag = %best.element.tag_name(), score = best.score, "readability top candidate");

    (best.score >= config.min_score).then_some(best)
}

fn direct_text(element: &Element<'_>) -> String {
    element
        .inner()
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
        .collect()
}

/// Text of an element with block boundaries and `<br>` as newlines and
/// whitespace runs collapsed.
fn block_text(element: &Element<'_>) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    push_blocks(element.inner(), &mut lines, &mut current);
    flush(&mut lines, &mut current);
    lines.join("\n")
}

fn push_blocks(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            for ch in text.chars() {
                if ch.is_whitespace() {
                    if !current.is_empty() && !current.ends_with(' ') {
                        current.push(' ');
                    }
                } else {
                    current.push(ch);
                }
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name == "br" {
                flush(lines, current);
                continue;
            }
            let is_block = BLOCK_TAGS.contains(&name);
            if is_block {
                flush(lines, current);
            }
            push_blocks(child_el, lines, current);
            if is_block {
                flush(lines, current);
            }
        }
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}
