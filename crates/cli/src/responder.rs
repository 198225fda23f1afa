use qa_fallback::{Completion, FallbackError};
use qa_search::QaEngine;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("No message provided")]
    EmptyMessage,

    #[error("No answer found in the corpus and no fallback is configured")]
    NoAnswer,

    #[error(transparent)]
    Fallback(#[from] FallbackError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Corpus,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Corpus first, generative fallback second.
pub struct Assistant {
    engine: QaEngine,
    fallback: Option<Arc<dyn Completion>>,
    system_prompt: String,
}

impl Assistant {
    pub fn new(
        engine: QaEngine,
        fallback: Option<Arc<dyn Completion>>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            fallback,
            system_prompt: system_prompt.into(),
        }
    }

    pub async fn respond(&self, message: &str) -> Result<Reply, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        if let Some(text) = self.engine.answer_query(message).await {
            return Ok(Reply {
                text,
                source: ReplySource::Corpus,
            });
        }

        let Some(fallback) = &self.fallback else {
            return Err(AssistantError::NoAnswer);
        };

        log::info!("Falling back to generative completion");
        let text = fallback.complete(&self.system_prompt, message).await?;
        Ok(Reply {
            text,
            source: ReplySource::Fallback,
        })
    }

    #[must_use]
    pub const fn engine(&self) -> &QaEngine {
        &self.engine
    }

    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
