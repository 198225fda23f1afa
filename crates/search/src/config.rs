use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const DEFAULT_QUESTION_WORDS: &[&str] = &[
    "what", "how", "when", "where", "who", "why", "is", "are", "can", "do", "does",
];

/// Multipliers applied to each matcher's raw confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyWeights {
    pub exact: f32,
    pub fuzzy: f32,
    pub semantic: f32,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            exact: 1.0,
            fuzzy: 0.8,
            semantic: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum weighted score for the ensemble to answer.
    pub confidence_threshold: f32,
    pub fuzzy_threshold: f32,
    pub semantic_threshold: f32,
    pub question_words: Vec<String>,
    /// Upper bound for the query embedding call; `None` waits indefinitely.
    pub embed_timeout_ms: Option<u64>,
    pub weights: StrategyWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            fuzzy_threshold: 0.80,
            semantic_threshold: 0.75,
            question_words: DEFAULT_QUESTION_WORDS
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
            embed_timeout_ms: None,
            weights: StrategyWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("fuzzy_threshold", self.fuzzy_threshold),
            ("semantic_threshold", self.semantic_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        for (name, value) in [
            ("weights.exact", self.weights.exact),
            ("weights.fuzzy", self.weights.fuzzy),
            ("weights.semantic", self.weights.semantic),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.embed_timeout_ms == Some(0) {
            return Err(SearchError::InvalidConfig(
                "embed_timeout_ms must be positive when set".to_string(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn embed_timeout(&self) -> Option<Duration> {
        self.embed_timeout_ms.map(Duration::from_millis)
    }
}
