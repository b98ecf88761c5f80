//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extraction strategies to query fetched pages with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use gist_core::parse::Document;
//!
//! let html = r#"<div id="articleWrap"><p>첫 문단</p><p>둘째 문단</p></div>"#;
//! let doc = Document::parse(html);
//! let wrap = doc.select_first("div#articleWrap").unwrap().unwrap();
//! assert_eq!(wrap.text_lines(), "첫 문단\n둘째 문단");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{GistError, Result};

/// Elements whose text content is never rendered as prose.
const NON_PROSE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string as-is.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`GistError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(Element::wrap).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(Element::wrap))
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        self.select_first("title")
            .ok()
            .flatten()
            .map(|el| el.text().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| GistError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A thin wrapper around scraper's `ElementRef`.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn wrap(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    pub(crate) fn inner(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with each text node trimmed, empty nodes
    /// dropped, and the remainder joined by newlines.
    ///
    /// Text inside `script`, `style`, `noscript` and `template` is skipped.
    pub fn text_lines(&self) -> String {
        self.element
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let non_prose = node
                    .ancestors()
                    .filter_map(|ancestor| ancestor.value().as_element())
                    .any(|el| NON_PROSE_TAGS.contains(&el.name()));
                (!non_prose).then_some(&**text)
            })
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the parent element, if the parent is an element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::wrap)
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(Element::wrap).collect())
    }
}
