//! Corpus-first question answering.
//!
//! A query is expanded into up to three variants; each variant is scored by
//! the exact, fuzzy and semantic matchers, scores are weighted, and the best
//! candidate is returned only if it clears the confidence threshold.
//!
//! ```text
//! query ──> QueryExpander ──> variants
//!              │
//!              ├──> ExactMatcher    × 1.0 ─┐
//!              ├──> FuzzyMatcher    × 0.8 ─┼──> EnsembleRanker ──> answer | None
//!              └──> SemanticMatcher × 0.9 ─┘
//! ```

mod config;
mod engine;
mod ensemble;
mod error;
mod exact;
mod fuzzy;
mod query_expansion;
mod semantic;
mod types;

#[cfg(test)]
mod test_support;

pub use config::{EngineConfig, StrategyWeights};
pub use engine::QaEngine;
pub use ensemble::EnsembleRanker;
pub use error::{Result, SearchError};
pub use exact::ExactMatcher;
pub use fuzzy::{token_sort_ratio, FuzzyMatcher};
pub use query_expansion::QueryExpander;
pub use semantic::SemanticMatcher;
pub use types::{Candidate, MatchResult, RankOutcome, Strategy, StrategyScore, VariantTrace};
