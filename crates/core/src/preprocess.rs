use std::sync::LazyLock;

use regex::Regex;

/// Tags whose whole subtree never carries article prose.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "canvas", "form", "nav", "footer", "aside", "button", "select",
];

/// Class/ID patterns for page chrome. Matching elements are unwrapped, not dropped,
/// so misclassified containers keep their text.
static UNLIKELY_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|sns|reporter|copyright)").unwrap()
});

static POSITIVE_PATTERNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(article|body|content|entry|main|news|post|text|story)").unwrap());

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to drop script/style/nav/footer and similar subtrees
    pub remove_noise: bool,
    /// Whether to drop HTML comments
    pub remove_comments: bool,
    /// Whether to unwrap elements whose class/id looks like page chrome
    pub remove_unlikely: bool,
    /// Whether to drop elements hidden with `hidden` or inline `display:none`
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_noise: true, remove_comments: true, remove_unlikely: true, remove_hidden: true }
    }
}

/// Preprocess HTML before heuristic extraction.
///
/// Rewriting is streaming; on a rewriter error the input is returned unchanged.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("*", |el| {
                    let tag = el.tag_name();
                    if config.remove_noise && NOISE_TAGS.contains(&tag.as_str()) {
                        el.remove();
                        return Ok(());
                    }

                    if config.remove_hidden && is_hidden(el.get_attribute("hidden"), el.get_attribute("style")) {
                        el.remove();
                        return Ok(());
                    }

                    if config.remove_unlikely {
                        let markers = [el.get_attribute("id"), el.get_attribute("class")];
                        let chrome = markers.iter().flatten().flat_map(|m| m.split_whitespace()).any(|name| {
                            UNLIKELY_PATTERNS.is_match(name) && !POSITIVE_PATTERNS.is_match(name)
                        });
                        if chrome && tag != "body" && tag != "article" {
                            el.remove_and_keep_content();
                        }
                    }

                    Ok(())
                }),
                lol_html::comments!("*", |c| {
                    if config.remove_comments {
                        c.remove();
                    }
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| output.push_str(&String::from_utf8_lossy(c)),
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { output }
}

fn is_hidden(hidden: Option<String>, style: Option<String>) -> bool {
    if hidden.is_some() {
        return true;
    }
    style.is_some_and(|s| {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        compact.contains("display:none") || compact.contains("visibility:hidden")
    })
}
