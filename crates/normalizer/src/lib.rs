//! # QA Normalizer
//!
//! Turns free text into the normalized form every matcher compares against.
//!
//! ## Pipeline
//!
//! ```text
//! raw text
//!     │
//!     ├──> lowercase
//!     ├──> abbreviation expansion (ordered, whole-word, compounding)
//!     ├──> word tokens (\w+ runs, punctuation dropped)
//!     ├──> stopword filter
//!     └──> tokens joined with single spaces
//! ```
//!
//! Given the same tables the output depends only on the input, so corpus
//! questions normalized at build time and queries normalized at request time
//! always agree.
//!
//! ## Example
//!
//! ```
//! use qa_normalizer::Normalizer;
//!
//! let normalizer = Normalizer::builtin();
//! assert_eq!(
//!     normalizer.normalize("When is the CAT?"),
//!     "continuous assessment test"
//! );
//! ```

mod error;
mod normalizer;
mod stopwords;
mod synonyms;

pub use error::{NormalizerError, Result};
pub use normalizer::{Normalizer, NormalizerConfig};
pub use stopwords::StopwordSet;
pub use synonyms::{SynonymEntry, SynonymTable};
