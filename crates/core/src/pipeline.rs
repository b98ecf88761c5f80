//! End-to-end summarization of one article URL.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use sha2::{Digest, Sha256};

use crate::extract::Extractor;
use crate::summarize::Summarizer;
use crate::target::SummaryTarget;
use crate::Result;

/// Characters of the first output that feed the fingerprint.
const FINGERPRINT_PREFIX_CHARS: usize = 64;
/// Hex digits kept from the digest.
const FINGERPRINT_LEN: usize = 12;

/// Outputs of one pipeline run.
///
/// Serializes flat: `{"id": "...", "chars100": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub id: String,
    pub outputs: BTreeMap<SummaryTarget, String>,
}

impl SummaryResult {
    pub fn get(&self, target: SummaryTarget) -> Option<&str> {
        self.outputs.get(&target).map(String::as_str)
    }
}

impl Serialize for SummaryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outputs.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (target, text) in &self.outputs {
            map.serialize_entry(&target.key(), text)?;
        }
        map.end()
    }
}

/// Short identifier for a result: the first 12 hex digits of
/// `sha256(url + first 64 chars of the first output)`.
pub fn fingerprint(url: &str, first_output: &str) -> String {
    let prefix: String = first_output.chars().take(FINGERPRINT_PREFIX_CHARS).collect();
    let digest = Sha256::digest(format!("{url}{prefix}").as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Extract, summarize for each target, postprocess, fingerprint.
pub struct Pipeline {
    extractor: Extractor,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(extractor: Extractor, summarizer: Summarizer) -> Self {
        Self { extractor, summarizer }
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Runs the pipeline for `url`.
    ///
    /// Targets are processed in the given order; the first failure aborts
    /// the run and no partial result is returned.
    ///
    /// # Errors
    ///
    /// Any extraction error, [`CapabilityUnavailable`](crate::GistError::CapabilityUnavailable)
    /// or [`Generation`](crate::GistError::Generation).
    pub async fn run(&self, url: &str, targets: &[SummaryTarget]) -> Result<SummaryResult> {
        let source = self.extractor.extract(url).await?;
        tracing::info!(url, chars = source.char_count(), targets = targets.len(), "summarizing article");

        let mut outputs = BTreeMap::new();
        for &target in targets {
            let raw = self.summarizer.summarize(source.text(), target).await?;
            outputs.insert(target, target.postprocess(&raw));
        }

        let first_output = targets.first().and_then(|t| outputs.get(t)).map(String::as_str).unwrap_or_default();
        let id = fingerprint(url, first_output);
        tracing::info!(url, id = %id, "summary complete");

        Ok(SummaryResult { id, outputs })
    }
}
