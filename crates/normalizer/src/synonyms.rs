use crate::error::{NormalizerError, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Built-in campus abbreviations, in application order.
const BUILTIN_SYNONYMS: &[(&str, &str)] = &[
    ("vit", "vellore institute of technology"),
    ("hostel", "dormitory"),
    ("hod", "head of department"),
    ("cse", "computer science engineering"),
    ("ece", "electronics and communication engineering"),
    ("mech", "mechanical engineering"),
    ("ffcs", "fully flexible credit system"),
    ("da", "digital assignment"),
    ("cat", "continuous assessment test"),
    ("fat", "final assessment test"),
];

/// One abbreviation → expansion pair as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub abbreviation: String,
    pub expansion: String,
}

impl SynonymEntry {
    pub fn new(abbreviation: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            expansion: expansion.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledSynonym {
    entry: SynonymEntry,
    pattern: Regex,
}

/// Ordered abbreviation table.
///
/// Entries are applied one after another, each over the output of the previous
/// one, so an expansion that contains a later abbreviation is expanded again.
/// The order is part of the normalized form and must not be reshuffled.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: Vec<CompiledSynonym>,
}

impl SynonymTable {
    pub fn new(entries: impl IntoIterator<Item = SynonymEntry>) -> Result<Self> {
        let entries = entries
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_SYNONYMS
            .iter()
            .map(|(abbr, full)| CompiledSynonym {
                entry: SynonymEntry::new(*abbr, *full),
                pattern: word_pattern(abbr).expect("built-in synonym patterns are valid"),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn builtin_entries() -> Vec<SynonymEntry> {
        BUILTIN_SYNONYMS
            .iter()
            .map(|(abbr, full)| SynonymEntry::new(*abbr, *full))
            .collect()
    }

    /// Apply every entry in order to already-lowercased text.
    pub fn expand(&self, text: &str) -> String {
        let mut out = text.to_string();
        for synonym in &self.entries {
            if synonym.pattern.is_match(&out) {
                out = synonym
                    .pattern
                    .replace_all(&out, NoExpand(&synonym.entry.expansion))
                    .into_owned();
            }
        }
        out
    }

    pub fn entries(&self) -> impl Iterator<Item = &SynonymEntry> {
        self.entries.iter().map(|s| &s.entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compile(entry: SynonymEntry) -> Result<CompiledSynonym> {
    let abbreviation = entry.abbreviation.trim().to_lowercase();
    if abbreviation.is_empty() {
        return Err(NormalizerError::EmptyAbbreviation {
            expansion: entry.expansion,
        });
    }
    let pattern = word_pattern(&abbreviation).map_err(|source| NormalizerError::Pattern {
        abbreviation: abbreviation.clone(),
        source,
    })?;
    Ok(CompiledSynonym {
        entry: SynonymEntry {
            abbreviation,
            expansion: entry.expansion,
        },
        pattern,
    })
}

fn word_pattern(abbreviation: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(abbreviation)))
}
