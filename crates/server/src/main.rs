mod config;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use gist_core::{
    ExtractConfig, Extractor, FetchConfig, HttpGeneratorConfig, HttpGeneratorFactory, LazyGenerator, Pipeline,
    Summarizer,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use routes::{AppState, router};

const DEFAULT_LOG_FILTER: &str = "gist_server=info,gist_core=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = ServerConfig::default().from_env();
    tracing::info!(
        model = %config.model_name,
        generator = %config.generator_url,
        cache_size = config.cache_size,
        mode = ?config.summary_mode,
        "starting gist-server"
    );

    let state = AppState { pipeline: Arc::new(build_pipeline(&config)), default_mode: config.summary_mode };

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn build_pipeline(config: &ServerConfig) -> Pipeline {
    let extract = ExtractConfig {
        fetch: FetchConfig { timeout: config.fetch_timeout, ..Default::default() },
        ..Default::default()
    };
    let generator = HttpGeneratorFactory::new(HttpGeneratorConfig {
        endpoint: config.generator_url.clone(),
        model: config.model_name.clone(),
        ..Default::default()
    });

    Pipeline::new(
        Extractor::new(extract),
        Summarizer::new(LazyGenerator::new(generator), config.cache_size),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
