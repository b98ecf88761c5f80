//! The external generative capability.
//!
//! Summaries come from a sequence-to-sequence model served elsewhere. This
//! module defines the [`Generator`] seam, the decoding parameters derived
//! from a [`TokenBudget`], an HTTP-backed implementation, and
//! [`LazyGenerator`], a handle that initializes the capability at most once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::target::TokenBudget;
use crate::{GistError, Result};

/// Default model served by the inference endpoint.
pub const DEFAULT_MODEL: &str = "csebuetnlp/mT5_multilingual_XLSum";

/// Decoding parameters passed through to the model.
///
/// Beam search with repeated n-gram suppression and early stopping keeps
/// short summaries from looping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_length: usize,
    pub min_length: usize,
    pub num_beams: u32,
    pub no_repeat_ngram_size: u32,
    pub length_penalty: f32,
    pub early_stopping: bool,
    /// Input is truncated to this many tokens before encoding.
    pub truncate: usize,
}

impl GenerationParams {
    pub fn for_budget(budget: TokenBudget) -> Self {
        Self {
            max_length: budget.max_tokens,
            min_length: budget.min_tokens,
            num_beams: 4,
            no_repeat_ngram_size: 3,
            length_penalty: 1.0,
            early_stopping: true,
            truncate: 2048,
        }
    }
}

/// Text-in, text-out generation under a token budget.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a summary of `text`. The result is the raw model output.
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String>;
}

/// Builds a [`Generator`]. Called at most once per successful initialization.
#[async_trait]
pub trait GeneratorFactory: Send + Sync {
    /// Loads the capability, failing with [`GistError::CapabilityUnavailable`].
    async fn load(&self) -> Result<Arc<dyn Generator>>;
}

/// Once-initialized handle to the generative capability.
///
/// Concurrent first callers wait on a single initialization. A failed
/// initialization leaves the handle empty so a later call can try again.
pub struct LazyGenerator {
    factory: Box<dyn GeneratorFactory>,
    cell: OnceCell<Arc<dyn Generator>>,
}

impl LazyGenerator {
    pub fn new(factory: impl GeneratorFactory + 'static) -> Self {
        Self { factory: Box::new(factory), cell: OnceCell::new() }
    }

    /// Returns the capability, loading it on first use.
    pub async fn get(&self) -> Result<&Arc<dyn Generator>> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!("loading summarization model");
                let generator = self.factory.load().await;
                match &generator {
                    Ok(_) => tracing::info!("summarization model ready"),
                    Err(e) => tracing::error!(error = %e, "summarization model failed to load"),
                }
                generator
            })
            .await
    }

    /// Whether the capability has been initialized.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

/// Settings for the HTTP inference endpoint.
#[derive(Debug, Clone)]
pub struct HttpGeneratorConfig {
    /// Base URL of the inference server.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Task prefix prepended to the input text.
    pub prompt_prefix: String,
    /// Connect timeout in seconds. Generation itself is not time-bounded.
    pub connect_timeout: u64,
}

impl Default for HttpGeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt_prefix: "summarize: ".to_string(),
            connect_timeout: 10,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    inputs: String,
    parameters: &'a GenerationParams,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

/// [`Generator`] backed by an HTTP inference server.
pub struct HttpGenerator {
    http: Client,
    config: HttpGeneratorConfig,
}

impl HttpGenerator {
    /// Connects to the endpoint and checks that the model is being served.
    pub async fn connect(config: HttpGeneratorConfig) -> Result<Self> {
        let unavailable = |reason: String| {
            GistError::CapabilityUnavailable(format!("{} at {}: {}", config.model, config.endpoint, reason))
        };

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| unavailable(e.to_string()))?;

        let health = http
            .get(endpoint_url(&config.endpoint, "health"))
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !health.status().is_success() {
            return Err(unavailable(format!("health check returned {}", health.status())));
        }

        Ok(Self { http, config })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            inputs: format!("{}{}", self.config.prompt_prefix, text),
            parameters: params,
        };

        tracing::debug!(max_length = params.max_length, min_length = params.min_length, "requesting generation");

        let response = self
            .http
            .post(endpoint_url(&self.config.endpoint, "generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| GistError::Generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GistError::Generation(format!("inference server returned {}", status)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GistError::Generation(format!("invalid response: {}", e)))?;

        let generated = match body {
            GenerateResponse::Single(g) => g.generated_text,
            GenerateResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| GistError::Generation("empty response".to_string()))?,
        };

        Ok(generated.trim().to_string())
    }
}

/// Loads an [`HttpGenerator`] from its config.
pub struct HttpGeneratorFactory {
    config: HttpGeneratorConfig,
}

impl HttpGeneratorFactory {
    pub fn new(config: HttpGeneratorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl GeneratorFactory for HttpGeneratorFactory {
    async fn load(&self) -> Result<Arc<dyn Generator>> {
        let generator = HttpGenerator::connect(self.config.clone()).await?;
        Ok(Arc::new(generator))
    }
}

fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
