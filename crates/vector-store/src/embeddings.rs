use crate::error::{Result, VectorStoreError};
use crate::http::HttpEmbedder;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Text → dense vector capability.
///
/// Implementations must be deterministic for identical input and return
/// vectors of [`Embedder::dimension`] length on every call.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| VectorStoreError::EmbeddingError("Empty embedding result".to_string()))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Deterministic hash-seeded vectors, no model required.
    #[default]
    Stub,
    /// OpenAI-compatible `/embeddings` endpoint.
    Http,
}

impl EmbeddingMode {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "http" => Ok(Self::Http),
            other => Err(VectorStoreError::EmbeddingError(format!(
                "Unsupported QA_EMBEDDING_MODE '{other}' (expected 'stub' or 'http')"
            ))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Http => "http",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub mode: EmbeddingMode,
    /// Vector length for the stub backend; the HTTP backend probes its own.
    pub dimension: usize,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable that holds the API key.
    pub api_key_env: String,
    pub max_batch: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::Stub,
            dimension: 384,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_batch: 64,
        }
    }
}

impl EmbeddingConfig {
    /// Apply `QA_EMBEDDING_MODE` / `QA_EMBEDDING_MODEL` on top of file settings.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = env::var("QA_EMBEDDING_MODE") {
            self.mode = EmbeddingMode::parse(&raw)?;
        }
        if let Ok(model) = env::var("QA_EMBEDDING_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        Ok(())
    }
}

/// Build the configured embedder.
pub async fn embedder_from_config(cfg: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match cfg.mode {
        EmbeddingMode::Stub => {
            log::info!("Using stub embeddings (dimension {})", cfg.dimension);
            Ok(Arc::new(StubEmbedder::new(cfg.dimension)))
        }
        EmbeddingMode::Http => {
            let embedder = HttpEmbedder::connect(cfg).await?;
            log::info!(
                "Using HTTP embeddings: model={} dimension={}",
                cfg.model,
                embedder.dimension()
            );
            Ok(Arc::new(embedder))
        }
    }
}

/// Deterministic embedder: every text maps to a fixed pseudo-random unit vector.
///
/// Identical text always yields the identical vector; unrelated texts land
/// close to orthogonal in high dimensions.
#[derive(Clone, Debug)]
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| stub_embed(text, self.dimension))
            .collect())
    }
}

/// Fixture embedder backed by an explicit text → vector table.
///
/// Unknown text embeds to the zero vector, which has cosine similarity 0 with
/// everything.
#[derive(Clone, Debug, Default)]
pub struct LookupEmbedder {
    dimension: usize,
    table: HashMap<String, Vec<f32>>,
}

impl LookupEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            table: HashMap::new(),
        }
    }

    /// Register `vector` for `text`.
    pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Result<Self> {
        if vector.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.table.insert(text.into(), vector);
        Ok(self)
    }
}

#[async_trait]
impl Embedder for LookupEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.table
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.dimension])
            })
            .collect())
    }
}

/// Cosine similarity; 0.0 for length mismatch or zero-norm input.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for v in vec {
        *v /= norm;
    }
}

fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_is_deterministic_and_unit_length() {
        let embedder = StubEmbedder::new(64);
        let a = embedder.embed("hostel fees").await.unwrap();
        let b = embedder.embed("hostel fees").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm={norm}");
    }

    #[tokio::test]
    async fn stub_separates_different_text() {
        let embedder = StubEmbedder::new(384);
        let a = embedder.embed("library timings").await.unwrap();
        let b = embedder.embed("mess menu").await.unwrap();
        assert_ne!(a, b);
        assert!(cosine_similarity(&a, &b) < 0.5);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn stub_batch_preserves_order() {
        let embedder = StubEmbedder::new(16);
        let texts = vec!["one".to_string(), "two".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch[0], embedder.embed("one").await.unwrap());
        assert_eq!(batch[1], embedder.embed("two").await.unwrap());
    }

    #[tokio::test]
    async fn lookup_unknown_text_is_zero() {
        let embedder = LookupEmbedder::new(2).with("known", vec![1.0, 0.0]).unwrap();
        assert_eq!(embedder.embed("known").await.unwrap(), vec![1.0, 0.0]);
        assert_eq!(embedder.embed("other").await.unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn lookup_rejects_wrong_length_vector() {
        let err = LookupEmbedder::new(2).with("short", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::InvalidDimension {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn mode_parse() {
        assert_eq!(EmbeddingMode::parse("STUB").unwrap(), EmbeddingMode::Stub);
        assert_eq!(EmbeddingMode::parse(" http ").unwrap(), EmbeddingMode::Http);
        assert!(EmbeddingMode::parse("onnx").is_err());
    }
}
