use qa_normalizer::Normalizer;
use qa_vector_store::{CorpusIndex, Embedder, LookupEmbedder, QaRow};
use std::sync::Arc;

pub(crate) async fn index_with(rows: &[(&str, &str)], embedder: Arc<dyn Embedder>) -> CorpusIndex {
    let rows = rows.iter().map(|(q, a)| QaRow::new(*q, *a)).collect();
    CorpusIndex::build(rows, Arc::new(Normalizer::builtin()), embedder)
        .await
        .unwrap()
}

/// Index whose embedder maps every text to the zero vector.
pub(crate) async fn index_of(rows: &[(&str, &str)]) -> CorpusIndex {
    index_with(rows, Arc::new(LookupEmbedder::new(4))).await
}
