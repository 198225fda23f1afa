use crate::types::MatchResult;
use qa_vector_store::{cosine_similarity, CorpusIndex};
use std::time::Duration;

/// Cosine similarity between the query embedding and every corpus entry.
///
/// Embedding problems at query time degrade to a miss with score 0.0; they
/// never reach the caller.
#[derive(Debug, Clone, Copy)]
pub struct SemanticMatcher {
    threshold: f32,
    embed_timeout: Option<Duration>,
}

impl SemanticMatcher {
    #[must_use]
    pub const fn new(threshold: f32, embed_timeout: Option<Duration>) -> Self {
        Self {
            threshold,
            embed_timeout,
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    pub async fn find<'a>(&self, query: &str, index: &'a CorpusIndex) -> MatchResult<'a> {
        self.find_normalized(&index.normalize(query), index).await
    }

    /// A miss still carries the best similarity seen.
    pub async fn find_normalized<'a>(
        &self,
        normalized: &str,
        index: &'a CorpusIndex,
    ) -> MatchResult<'a> {
        if index.is_empty() {
            return MatchResult::miss();
        }

        let Some(query_vector) = self.embed_query(normalized, index).await else {
            return MatchResult::miss();
        };

        if query_vector.len() != index.dimension() {
            log::warn!(
                "Query embedding has dimension {}, index expects {}; skipping semantic match",
                query_vector.len(),
                index.dimension()
            );
            return MatchResult::miss();
        }

        let mut best: Option<(usize, f32)> = None;
        for (idx, entry) in index.entries().iter().enumerate() {
            let similarity = cosine_similarity(&query_vector, &entry.embedding);
            if best.map_or(true, |(_, score)| similarity > score) {
                best = Some((idx, similarity));
            }
        }

        let Some((idx, similarity)) = best else {
            return MatchResult::miss();
        };

        log::debug!("semantic best: entry={idx} similarity={similarity:.4}");
        match index.get(idx) {
            Some(entry) if similarity >= self.threshold => {
                MatchResult::hit(entry.answer.as_str(), similarity)
            }
            _ => MatchResult {
                answer: None,
                score: similarity,
            },
        }
    }

    async fn embed_query(&self, normalized: &str, index: &CorpusIndex) -> Option<Vec<f32>> {
        let embedding = index.embedder().embed(normalized);
        let result = match self.embed_timeout {
            Some(limit) => match tokio::time::timeout(limit, embedding).await {
                Ok(result) => result,
                Err(_) => {
                    log::warn!("Query embedding timed out after {limit:?}; skipping semantic match");
                    return None;
                }
            },
            None => embedding.await,
        };

        match result {
            Ok(vector) => Some(vector),
            Err(e) => {
                log::warn!("Query embedding failed: {e}; skipping semantic match");
                None
            }
        }
    }
}

impl Default for SemanticMatcher {
    fn default() -> Self {
        Self::new(0.75, None)
    }
}
