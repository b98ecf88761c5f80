//! Process configuration, read once at startup.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use gist_core::{DEFAULT_CACHE_CAPACITY, DEFAULT_MODEL, TargetSet};

/// Server settings. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Model identifier passed to the inference endpoint
    pub model_name: String,
    /// Maximum cached generations
    pub cache_size: u64,
    /// Base URL of the inference endpoint
    pub generator_url: String,
    pub bind_addr: SocketAddr,
    /// Target set used when a request does not name one
    pub summary_mode: TargetSet,
    /// Article fetch timeout in seconds
    pub fetch_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            cache_size: DEFAULT_CACHE_CAPACITY,
            generator_url: "http://127.0.0.1:8080".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            summary_mode: TargetSet::Chars,
            fetch_timeout: 10,
        }
    }
}

impl ServerConfig {
    /// Overrides defaults from process environment variables.
    pub fn from_env(self) -> Self {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Overrides defaults from `lookup`. Values that fail to parse are
    /// logged and skipped.
    pub fn from_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("MODEL_NAME").filter(|v| !v.trim().is_empty()) {
            self.model_name = val.trim().to_string();
        }

        if let Some(val) = lookup("GENERATOR_URL").filter(|v| !v.trim().is_empty()) {
            self.generator_url = val.trim().to_string();
        }

        if let Some(size) = parse_var(&lookup, "CACHE_SIZE") {
            self.cache_size = size;
        }

        if let Some(addr) = parse_var(&lookup, "BIND_ADDR") {
            self.bind_addr = addr;
        }

        if let Some(mode) = parse_var(&lookup, "SUMMARY_MODE") {
            self.summary_mode = mode;
        }

        if let Some(secs) = parse_var(&lookup, "FETCH_TIMEOUT") {
            self.fetch_timeout = secs;
        }

        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid environment value");
            None
        }
    }
}
