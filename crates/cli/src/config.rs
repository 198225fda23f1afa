use anyhow::{Context, Result};
use qa_fallback::FallbackConfig;
use qa_normalizer::NormalizerConfig;
use qa_search::EngineConfig;
use qa_vector_store::EmbeddingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "qa.toml";

/// Contents of `qa.toml`. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: PathBuf,
    pub normalizer: NormalizerConfig,
    pub engine: EngineConfig,
    pub embedding: EmbeddingConfig,
    pub fallback: FallbackConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/queries.json"),
            normalizer: NormalizerConfig::default(),
            engine: EngineConfig::default(),
            embedding: EmbeddingConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the config file and apply environment overrides.
    ///
    /// An explicit path (flag or `QA_CONFIG`) must exist; otherwise `qa.toml`
    /// in the working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os("QA_CONFIG").map(PathBuf::from);
        let mut cfg = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found; using defaults");
                    Self::default()
                }
            }
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let cfg = Self::parse(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(raw)?;
        cfg.engine.validate()?;
        Ok(cfg)
    }

    /// `QA_DATASET`, `QA_EMBEDDING_MODE`, `QA_EMBEDDING_MODEL`, `QA_FALLBACK_MODEL`.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(dataset) = env::var_os("QA_DATASET") {
            if !dataset.is_empty() {
                self.dataset = PathBuf::from(dataset);
            }
        }
        self.embedding
            .apply_env()
            .context("Invalid embedding override")?;
        self.fallback.apply_env();
        Ok(())
    }
}
