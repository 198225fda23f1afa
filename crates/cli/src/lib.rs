//! Shell around the answering engine: configuration, startup wiring, the
//! corpus-then-fallback assistant and the `/chat` HTTP API.

pub mod config;
pub mod http_api;
pub mod responder;

use anyhow::{Context, Result};
use config::AppConfig;
use qa_fallback::{Completion, OpenAiCompatibleClient};
use qa_normalizer::Normalizer;
use qa_search::QaEngine;
use qa_vector_store::{embedder_from_config, load_rows, CorpusIndex};
use responder::Assistant;
use std::sync::Arc;

pub fn build_normalizer(cfg: &AppConfig) -> Result<Normalizer> {
    Normalizer::from_config(&cfg.normalizer).context("Invalid [normalizer] section")
}

/// Load the dataset and build the index once.
///
/// A dataset that cannot be read degrades to an empty corpus; an embedder
/// that fails while indexing is fatal.
pub async fn build_engine(cfg: &AppConfig) -> Result<QaEngine> {
    let normalizer = Arc::new(build_normalizer(cfg)?);

    let rows = match load_rows(&cfg.dataset).await {
        Ok(rows) => rows,
        Err(err) => {
            log::error!(
                "Error loading dataset {}: {err}; continuing with an empty corpus",
                cfg.dataset.display()
            );
            Vec::new()
        }
    };

    let embedder = embedder_from_config(&cfg.embedding)
        .await
        .context("Failed to initialize embedder")?;
    let index = CorpusIndex::build(rows, normalizer, embedder)
        .await
        .context("Failed to build corpus index")?;

    QaEngine::new(Arc::new(index), cfg.engine.clone()).context("Invalid [engine] section")
}

/// Fallback client when enabled and an API key is available.
pub fn build_fallback(cfg: &AppConfig) -> Option<Arc<dyn Completion>> {
    if !cfg.fallback.enabled {
        log::debug!("Fallback disabled by configuration");
        return None;
    }
    match OpenAiCompatibleClient::from_config(&cfg.fallback) {
        Ok(client) => {
            log::info!("Fallback enabled: model={}", client.model());
            Some(Arc::new(client))
        }
        Err(err) => {
            log::warn!("Fallback disabled: {err}");
            None
        }
    }
}

pub async fn build_assistant(cfg: &AppConfig) -> Result<Assistant> {
    let engine = build_engine(cfg).await?;
    Ok(Assistant::new(
        engine,
        build_fallback(cfg),
        cfg.fallback.system_prompt.clone(),
    ))
}
