//! Article fetching over HTTP.
//!
//! A single GET with a browser-like User-Agent and a bounded timeout. Every
//! failure is classified so callers can tell a timeout from a refused
//! connection from an HTTP status. Bodies are decoded with the charset from
//! the `Content-Type` header or, failing that, the page's `<meta>` declaration.

use std::sync::LazyLock;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{GistError, Result};

/// Desktop Chrome User-Agent. News sites tend to serve stripped pages to bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, user_agent: BROWSER_USER_AGENT.to_string() }
    }
}

/// Leading bytes of a body searched for a `<meta>` charset declaration.
const META_SNIFF_BYTES: usize = 1024;

/// Matches both `<meta charset="...">` and the `http-equiv` content form.
static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap());

/// Parses and validates an article URL.
///
/// Only `http` and `https` URLs are accepted.
pub fn parse_article_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| GistError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(GistError::InvalidUrl(format!(
            "unsupported scheme '{}', URL must start with http:// or https://",
            other
        ))),
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and fails with [`GistError::HttpStatus`] on any
/// non-2xx final response.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_article_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| GistError::Connection(e.to_string()))?;

    tracing::debug!(url = %parsed_url, "fetching article");

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7")
        .send()
        .await
        .map_err(|e| classify(e, config.timeout))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "article fetch returned error status");
        return Err(GistError::HttpStatus { status: status.as_u16() });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.bytes().await.map_err(|e| classify(e, config.timeout))?;
    tracing::debug!(bytes = bytes.len(), "article fetched");

    Ok(decode_html(&bytes, content_type.as_deref()))
}

/// Decodes an HTML body to text.
///
/// The header charset wins over a `<meta>` declaration; UTF-8 is the
/// default. A byte order mark overrides both.
pub(crate) fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "article body contained malformed sequences");
    }
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(['"', '\'']).as_bytes())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

fn classify(err: reqwest::Error, timeout: u64) -> GistError {
    if err.is_timeout() {
        GistError::Timeout { timeout }
    } else if let Some(status) = err.status() {
        GistError::HttpStatus { status: status.as_u16() }
    } else {
        GistError::Connection(err.to_string())
    }
}
