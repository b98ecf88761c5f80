use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Positive patterns that suggest an element contains main content
static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|main|page|post|text|blog|story|news|view)").unwrap()
});

/// Negative patterns that suggest an element does NOT contain main content
static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|reporter)").unwrap()
});

/// Configuration for content scoring
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum paragraph bonus from character count
    pub max_length_bonus: f64,
    /// Characters per bonus point
    pub chars_per_point: usize,
    /// Paragraphs shorter than this do not contribute
    pub min_paragraph_chars: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            max_length_bonus: 3.0,
            chars_per_point: 100,
            min_paragraph_chars: 25,
        }
    }
}

/// Base score for an element by tag name
///
/// - ARTICLE: +10, SECTION/MAIN: +8, DIV: +5, TD/BLOCKQUOTE: +3
/// - FORM, lists: -3
/// - headings, TH, HEADER, FOOTER, NAV: -5
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" | "main" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "pre" => 0.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight adjustment
///
/// The id is checked before the class list; the first matching name decides.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let names = element
        .attr("id")
        .into_iter()
        .chain(element.attr("class").into_iter().flat_map(str::split_whitespace));

    for name in names {
        if POSITIVE.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Ratio of link text characters to total text characters, 0.0 to 1.0.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_text_length = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum::<usize>();

    (link_text_length as f64 / text_length as f64).min(1.0)
}

/// Score a paragraph contributes to its ancestors.
///
/// `1 + commas + min(chars / chars_per_point, max_length_bonus)`, counting both
/// ASCII and ideographic commas. Returns `None` for paragraphs too short to count.
pub fn paragraph_score(text: &str, config: &ScoreConfig) -> Option<f64> {
    let text = text.trim();
    let length = text.chars().count();
    if length < config.min_paragraph_chars {
        return None;
    }

    let commas = text.chars().filter(|c| matches!(c, ',' | '，' | '、')).count() as f64;
    let length_bonus = ((length / config.chars_per_point) as f64).min(config.max_length_bonus);

    Some(1.0 + commas + length_bonus)
}

/// Initial score of a candidate container before paragraph contributions.
pub fn initial_score(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    base_tag_score(element) + class_id_weight(element, config)
}
