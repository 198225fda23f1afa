use crate::config::EngineConfig;
use crate::ensemble::EnsembleRanker;
use crate::error::Result;
use crate::types::RankOutcome;
use qa_vector_store::CorpusIndex;
use std::sync::Arc;

/// Corpus-first answering over a shared, immutable index.
pub struct QaEngine {
    index: Arc<CorpusIndex>,
    ranker: EnsembleRanker,
}

impl QaEngine {
    pub fn new(index: Arc<CorpusIndex>, cfg: EngineConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            index,
            ranker: EnsembleRanker::from_config(&cfg),
        })
    }

    /// Best corpus answer, or `None` when nothing clears the confidence gate.
    pub async fn answer_query(&self, text: &str) -> Option<String> {
        let outcome = self.explain(text).await;
        match &outcome.best {
            Some(best) if outcome.answer.is_some() => log::debug!(
                "Answered via {} (variant {}, weighted {:.3})",
                best.strategy,
                best.variant,
                best.weighted_score
            ),
            Some(best) => log::info!(
                "No corpus answer for {text:?}: best {} scored {:.3} (threshold {:.2})",
                best.strategy,
                best.weighted_score,
                outcome.confidence_threshold
            ),
            None => log::info!("No corpus answer for {text:?}: no candidates"),
        }
        outcome.answer
    }

    /// Full per-variant, per-strategy trace.
    pub async fn explain(&self, text: &str) -> RankOutcome {
        self.ranker.rank_explained(text, &self.index).await
    }

    #[must_use]
    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }
}
