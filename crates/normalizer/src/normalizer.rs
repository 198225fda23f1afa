use crate::error::Result;
use crate::stopwords::StopwordSet;
use crate::synonyms::{SynonymEntry, SynonymTable};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Normalizer tables as they appear in configuration.
///
/// `None` keeps the built-in table; the `extra_*` lists are appended after
/// whichever base table is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub synonyms: Option<Vec<SynonymEntry>>,
    pub extra_synonyms: Vec<SynonymEntry>,
    pub stopwords: Option<Vec<String>>,
    pub extra_stopwords: Vec<String>,
}

/// Stateless text normalizer over a fixed synonym table and stopword set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    synonyms: SynonymTable,
    stopwords: StopwordSet,
}

impl Normalizer {
    pub fn new(synonyms: SynonymTable, stopwords: StopwordSet) -> Self {
        Self {
            synonyms,
            stopwords,
        }
    }

    /// Normalizer with the built-in campus tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin(), StopwordSet::builtin())
    }

    pub fn from_config(cfg: &NormalizerConfig) -> Result<Self> {
        let mut entries = cfg
            .synonyms
            .clone()
            .unwrap_or_else(SynonymTable::builtin_entries);
        entries.extend(cfg.extra_synonyms.iter().cloned());
        let synonyms = SynonymTable::new(entries)?;

        let mut stopwords = match &cfg.stopwords {
            Some(words) => StopwordSet::new(words),
            None => StopwordSet::builtin(),
        };
        stopwords.extend(&cfg.extra_stopwords);

        log::debug!(
            "Normalizer configured: {} synonyms, {} stopwords",
            synonyms.len(),
            stopwords.len()
        );

        Ok(Self::new(synonyms, stopwords))
    }

    /// Lowercase, expand abbreviations, tokenize, drop stopwords and rejoin.
    ///
    /// Text made only of stopwords or punctuation normalizes to `""`.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let expanded = self.synonyms.expand(&text.to_lowercase());

        let words: Vec<&str> = WORD
            .find_iter(&expanded)
            .map(|m| m.as_str())
            .filter(|word| !self.stopwords.contains(word))
            .collect();

        words.join(" ")
    }

    /// Missing input normalizes to `""`.
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    #[must_use]
    pub const fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    #[must_use]
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_and_missing() {
        let normalizer = Normalizer::builtin();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize_opt(None), "");
        assert_eq!(normalizer.normalize_opt(Some("Hostel")), "dormitory");
    }

    #[test]
    fn test_stopwords_and_punctuation_only() {
        let normalizer = Normalizer::builtin();
        assert_eq!(normalizer.normalize("What is this?!"), "");
        assert_eq!(normalizer.normalize("... ,,, ???"), "");
    }

    #[test]
    fn test_exam_question_collapses() {
        let normalizer = Normalizer::builtin();
        let expected = "continuous assessment test final assessment test";
        assert_eq!(normalizer.normalize("What are CAT and FAT?"), expected);
        assert_eq!(normalizer.normalize("what are cat and fat"), expected);
    }

    #[test]
    fn test_vitamin_not_expanded() {
        let normalizer = Normalizer::builtin();
        assert_eq!(normalizer.normalize("vitamin"), "vitamin");
        assert_eq!(
            normalizer.normalize("Where is VIT?"),
            "where vellore institute technology"
        );
    }

    #[test]
    fn test_expansion_stopwords_are_filtered() {
        let normalizer = Normalizer::builtin();
        assert_eq!(
            normalizer.normalize("ECE syllabus"),
            "electronics communication engineering syllabus"
        );
    }

    #[test]
    fn test_from_config_replaces_and_extends() {
        let cfg = NormalizerConfig {
            synonyms: Some(vec![SynonymEntry::new("lib", "library")]),
            extra_synonyms: vec![SynonymEntry::new("hrs", "hours")],
            stopwords: Some(vec!["the".to_string()]),
            extra_stopwords: vec!["please".to_string()],
        };
        let normalizer = Normalizer::from_config(&cfg).unwrap();
        assert_eq!(
            normalizer.normalize("Please tell the LIB hrs for CAT"),
            "tell library hours for cat"
        );
    }

    #[test]
    fn test_default_config_matches_builtin() {
        let from_cfg = Normalizer::from_config(&NormalizerConfig::default()).unwrap();
        let builtin = Normalizer::builtin();
        let text = "How do I apply for hostel in VIT under FFCS?";
        assert_eq!(from_cfg.normalize(text), builtin.normalize(text));
    }

    #[test]
    fn test_config_from_toml_keeps_order() {
        let raw = r#"
            [[extra_synonyms]]
            abbreviation = "pg"
            expansion = "pg hostel"

            [[extra_synonyms]]
            abbreviation = "pgh"
            expansion = "postgraduate housing"
        "#;
        let cfg: NormalizerConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.extra_synonyms[0].abbreviation, "pg");
        assert_eq!(cfg.extra_synonyms[1].abbreviation, "pgh");
        assert!(cfg.synonyms.is_none());
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        let normalizer = Normalizer::builtin();
        assert_eq!(normalizer.normalize("Room_101, block-B"), "room_101 block b");
    }
}
