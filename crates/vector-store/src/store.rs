use crate::embeddings::Embedder;
use crate::error::{Result, VectorStoreError};
use crate::types::{CorpusEntry, QaRow};
use qa_normalizer::Normalizer;
use std::fmt;
use std::sync::Arc;

/// Immutable, ordered question/answer index.
///
/// The index keeps the normalizer and embedder it was built with, so every
/// query goes through the same functions as the corpus.
pub struct CorpusIndex {
    entries: Vec<CorpusEntry>,
    normalizer: Arc<Normalizer>,
    embedder: Arc<dyn Embedder>,
}

impl CorpusIndex {
    /// Normalize every row and embed all normalized questions in one batch.
    pub async fn build(
        rows: Vec<QaRow>,
        normalizer: Arc<Normalizer>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        if rows.is_empty() {
            log::info!("Corpus is empty; every query will miss");
            return Ok(Self::empty(normalizer, embedder));
        }

        let normalized: Vec<String> = rows
            .iter()
            .map(|row| normalizer.normalize(&row.question))
            .collect();

        let vectors = embedder.embed_batch(&normalized).await?;
        if vectors.len() != rows.len() {
            return Err(VectorStoreError::EmbeddingError(format!(
                "Embedder returned {} vectors for {} questions",
                vectors.len(),
                rows.len()
            )));
        }

        let dimension = embedder.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(VectorStoreError::InvalidDimension {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let entries: Vec<CorpusEntry> = rows
            .into_iter()
            .zip(normalized)
            .zip(vectors)
            .map(|((row, normalized_question), embedding)| CorpusEntry {
                original_question: row.question,
                normalized_question,
                answer: row.answer,
                embedding,
            })
            .collect();

        log::info!(
            "Built corpus index: {} entries, dimension {}",
            entries.len(),
            dimension
        );

        Ok(Self {
            entries,
            normalizer,
            embedder,
        })
    }

    #[must_use]
    pub fn empty(normalizer: Arc<Normalizer>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            entries: Vec::new(),
            normalizer,
            embedder,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&CorpusEntry> {
        self.entries.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    /// Normalize query text with the corpus normalizer.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }
}

impl fmt::Debug for CorpusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusIndex")
            .field("entries", &self.entries.len())
            .field("dimension", &self.dimension())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{LookupEmbedder, StubEmbedder};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![0.5; 4]).collect())
        }
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; 3]).collect())
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(VectorStoreError::EmbeddingError("provider down".to_string()))
        }
    }

    fn rows() -> Vec<QaRow> {
        vec![
            QaRow::new("What are CAT and FAT?", "Internal and final exams."),
            QaRow::new("Where is the hostel office?", "Block C."),
            QaRow::new("", "orphan answer"),
        ]
    }

    #[tokio::test]
    async fn build_keeps_order_and_normalizes() {
        let index = CorpusIndex::build(
            rows(),
            Arc::new(Normalizer::builtin()),
            Arc::new(StubEmbedder::new(32)),
        )
        .await
        .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.get(0).unwrap().normalized_question,
            "continuous assessment test final assessment test"
        );
        assert_eq!(index.get(1).unwrap().normalized_question, "where dormitory office");
        assert_eq!(index.get(2).unwrap().normalized_question, "");
        assert_eq!(index.get(2).unwrap().answer, "orphan answer");
        assert!(index.entries().iter().all(|e| e.embedding.len() == 32));
    }

    #[tokio::test]
    async fn empty_rows_skip_embedder() {
        let embedder = Arc::new(CountingEmbedder {
            calls: AtomicUsize::new(0),
        });
        let index = CorpusIndex::build(Vec::new(), Arc::new(Normalizer::builtin()), embedder.clone())
            .await
            .unwrap();
        assert!(index.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn embeds_in_one_batch() {
        let embedder = Arc::new(CountingEmbedder {
            calls: AtomicUsize::new(0),
        });
        CorpusIndex::build(rows(), Arc::new(Normalizer::builtin()), embedder.clone())
            .await
            .unwrap();
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_dimension_fails_fast() {
        let err = CorpusIndex::build(rows(), Arc::new(Normalizer::builtin()), Arc::new(ShortEmbedder))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::InvalidDimension {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[tokio::test]
    async fn embedder_failure_propagates() {
        let err = CorpusIndex::build(
            rows(),
            Arc::new(Normalizer::builtin()),
            Arc::new(FailingEmbedder),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, VectorStoreError::EmbeddingError(_)));
    }

    #[tokio::test]
    async fn lookup_fixture_vectors_are_stored() {
        let embedder = LookupEmbedder::new(2).with("where dormitory office", vec![0.0, 1.0]).unwrap();
        let index = CorpusIndex::build(rows(), Arc::new(Normalizer::builtin()), Arc::new(embedder))
            .await
            .unwrap();
        assert_eq!(index.get(1).unwrap().embedding, vec![0.0, 1.0]);
        assert_eq!(index.get(0).unwrap().embedding, vec![0.0, 0.0]);
        assert_eq!(index.dimension(), 2);
    }
}
