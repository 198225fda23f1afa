//! # QA Vector Store
//!
//! Embedding providers and the immutable question/answer corpus index.
//!
//! ## Architecture
//!
//! ```text
//! dataset (JSON / JSONL)
//!     │
//!     ├──> load_rows ──> QaRow[]
//!     │
//!     ├──> Normalizer ──> normalized_question
//!     │
//!     └──> Embedder (stub | lookup | http)
//!            └─> Vec<f32>[dimension]
//!                   │
//!                   └──> CorpusIndex (ordered, read-only)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use qa_normalizer::Normalizer;
//! use qa_vector_store::{CorpusIndex, QaRow, StubEmbedder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> qa_vector_store::Result<()> {
//! let rows = vec![QaRow::new("Where is the hostel office?", "Block C.")];
//! let index = CorpusIndex::build(
//!     rows,
//!     Arc::new(Normalizer::builtin()),
//!     Arc::new(StubEmbedder::new(64)),
//! )
//! .await?;
//! assert_eq!(index.len(), 1);
//! # Ok(())
//! # }
//! ```

mod corpus;
mod embeddings;
mod error;
mod http;
mod store;
mod types;

pub use corpus::{load_rows, parse_csv_rows, parse_rows};
pub use embeddings::{
    cosine_similarity, embedder_from_config, Embedder, EmbeddingConfig, EmbeddingMode,
    LookupEmbedder, StubEmbedder,
};
pub use error::{Result, VectorStoreError};
pub use http::HttpEmbedder;
pub use store::CorpusIndex;
pub use types::{CorpusEntry, QaRow};
