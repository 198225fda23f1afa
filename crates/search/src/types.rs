use serde::Serialize;
use std::fmt;

/// Outcome of a single matcher over the corpus.
///
/// `answer` borrows from the index; `score` is the raw confidence in [0, 1]
/// (cosine similarity can dip below zero on a semantic miss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub answer: Option<&'a str>,
    pub score: f32,
}

impl<'a> MatchResult<'a> {
    #[must_use]
    pub const fn hit(answer: &'a str, score: f32) -> Self {
        Self {
            answer: Some(answer),
            score,
        }
    }

    #[must_use]
    pub const fn miss() -> Self {
        Self {
            answer: None,
            score: 0.0,
        }
    }

    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.answer.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Exact,
    Fuzzy,
    Semantic,
}

impl Strategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted answer proposed by one strategy for one query variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub answer: String,
    pub weighted_score: f32,
    pub strategy: Strategy,
    /// Position of the variant in the expander output.
    pub variant: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyScore {
    pub strategy: Strategy,
    pub raw_score: f32,
    pub weighted_score: f32,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantTrace {
    pub text: String,
    pub normalized: String,
    pub scores: Vec<StrategyScore>,
    pub chosen: Option<Candidate>,
}

/// Full ranking trace for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankOutcome {
    pub query: String,
    pub variants: Vec<VariantTrace>,
    pub best: Option<Candidate>,
    pub confidence_threshold: f32,
    pub answer: Option<String>,
}
