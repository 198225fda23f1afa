//! Generative fallback for questions the corpus cannot answer.
//!
//! [`Completion`] is the capability the assistant depends on;
//! [`OpenAiCompatibleClient`] implements it against any
//! `/chat/completions` endpoint.

mod client;
mod error;

pub use client::{
    build_request_body, parse_completion, Completion, FallbackConfig, OpenAiCompatibleClient,
    DEFAULT_SYSTEM_PROMPT,
};
pub use error::{FallbackError, Result};
