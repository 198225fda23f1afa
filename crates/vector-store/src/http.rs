use crate::embeddings::{EmbeddingConfig, Embedder};
use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

const DIMENSION_PROBE: &str = "dimension probe";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible `POST {base_url}/embeddings` endpoint.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_batch: usize,
    dimension: usize,
}

impl HttpEmbedder {
    /// Resolve the API key and probe the provider once for its vector length.
    pub async fn connect(cfg: &EmbeddingConfig) -> Result<Self> {
        let api_key = env::var(&cfg.api_key_env).map_err(|_| {
            VectorStoreError::EmbeddingError(format!(
                "HTTP embeddings need an API key in ${}",
                cfg.api_key_env
            ))
        })?;

        let mut embedder = Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/embeddings", cfg.base_url.trim_end_matches('/')),
            model: cfg.model.clone(),
            api_key,
            max_batch: cfg.max_batch.max(1),
            dimension: 0,
        };

        let probe = embedder
            .request(&[DIMENSION_PROBE.to_string()])
            .await?
            .pop()
            .ok_or_else(|| {
                VectorStoreError::EmbeddingError("Provider returned no probe vector".to_string())
            })?;
        if probe.is_empty() {
            return Err(VectorStoreError::EmbeddingError(
                "Provider returned an empty probe vector".to_string(),
            ));
        }
        embedder.dimension = probe.len();
        Ok(embedder)
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await
            .map_err(|e| VectorStoreError::EmbeddingError(format!("Embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::EmbeddingError(format!(
                "Embedding provider returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            VectorStoreError::EmbeddingError(format!("Malformed embedding response: {e}"))
        })?;
        order_by_index(parsed.data, texts.len())
    }
}

/// Providers may answer out of order; place each vector at its `index`.
fn order_by_index(data: Vec<EmbeddingDatum>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(VectorStoreError::EmbeddingError(format!(
            "Provider returned {} vectors for {expected} inputs",
            data.len()
        )));
    }

    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for datum in data {
        let slot = slots.get_mut(datum.index).ok_or_else(|| {
            VectorStoreError::EmbeddingError(format!(
                "Provider returned out-of-range index {}",
                datum.index
            ))
        })?;
        *slot = Some(datum.embedding);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                VectorStoreError::EmbeddingError(format!("Provider omitted vector {i}"))
            })
        })
        .collect()
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.max_batch) {
            log::debug!("Embedding batch of {} texts via {}", batch.len(), self.endpoint);
            out.extend(self.request(batch).await?);
        }
        Ok(out)
    }
}
