use serde::{Deserialize, Serialize};

/// One question/answer pair as delivered by the dataset loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRow {
    pub question: String,
    pub answer: String,
}

impl QaRow {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Indexed corpus entry. Its position in the index is its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry {
    pub original_question: String,
    pub normalized_question: String,
    pub answer: String,
    #[serde(skip)]
    pub embedding: Vec<f32>,
}
