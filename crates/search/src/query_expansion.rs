use crate::config::DEFAULT_QUESTION_WORDS;
use qa_normalizer::Normalizer;
use std::collections::HashSet;

/// Produces the query variants the ensemble scores.
pub struct QueryExpander {
    question_words: HashSet<String>,
}

impl QueryExpander {
    pub fn new<I, S>(question_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            question_words: question_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Up to three variants, the raw query always first:
    /// 1. the query as given
    /// 2. lowercased tokens minus question words, when any were present
    /// 3. the normalized form, when non-empty and different from the query
    ///
    /// Duplicates are kept.
    pub fn expand(&self, query: &str, normalizer: &Normalizer) -> Vec<String> {
        let mut variants = vec![query.to_string()];

        let lowered = query.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        if tokens.iter().any(|t| self.question_words.contains(*t)) {
            let stripped: Vec<&str> = tokens
                .into_iter()
                .filter(|t| !self.question_words.contains(*t))
                .collect();
            variants.push(stripped.join(" "));
        }

        let normalized = normalizer.normalize(query);
        if !normalized.is_empty() && normalized != query {
            variants.push(normalized);
        }

        variants
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_WORDS.iter().copied())
    }
}
