use std::collections::HashSet;

const BUILTIN_STOPWORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "for", "to", "of", "with", "by", "is", "are", "am", "was",
    "were", "be", "been", "being", "and", "or", "but", "if", "then", "else", "when", "so", "than",
    "that", "this", "these", "those", "i", "you", "he", "she", "it", "we", "they", "who", "whom",
    "whose", "which", "what", "how",
];

/// Words dropped from the normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_STOPWORDS.iter().copied())
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
