use crate::types::MatchResult;
use qa_vector_store::CorpusIndex;

/// Equality of normalized forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ExactMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn find<'a>(&self, query: &str, index: &'a CorpusIndex) -> MatchResult<'a> {
        self.find_normalized(&index.normalize(query), index)
    }

    /// First entry in corpus order whose normalized question equals `normalized`.
    pub fn find_normalized<'a>(&self, normalized: &str, index: &'a CorpusIndex) -> MatchResult<'a> {
        index
            .entries()
            .iter()
            .find(|entry| entry.normalized_question == normalized)
            .map_or_else(MatchResult::miss, |entry| {
                MatchResult::hit(entry.answer.as_str(), 1.0)
            })
    }
}
