use crate::types::MatchResult;
use qa_vector_store::CorpusIndex;

/// Token-sort similarity against every normalized corpus question.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f32,
}

impl FuzzyMatcher {
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn find<'a>(&self, query: &str, index: &'a CorpusIndex) -> MatchResult<'a> {
        self.find_normalized(&index.normalize(query), index)
    }

    pub fn find_normalized<'a>(&self, normalized: &str, index: &'a CorpusIndex) -> MatchResult<'a> {
        let query = sort_tokens(normalized);

        let mut best: Option<(usize, f64)> = None;
        for (idx, entry) in index.entries().iter().enumerate() {
            let ratio = indel_ratio(&query, &sort_tokens(&entry.normalized_question));
            // strict: the earliest entry keeps a tie
            if best.map_or(true, |(_, score)| ratio > score) {
                best = Some((idx, ratio));
            }
        }

        let Some((idx, ratio)) = best else {
            return MatchResult::miss();
        };

        let score = (ratio / 100.0) as f32;
        log::debug!("fuzzy best: entry={idx} ratio={ratio:.2}");
        if score >= self.threshold {
            index
                .get(idx)
                .map_or_else(MatchResult::miss, |entry| {
                    MatchResult::hit(entry.answer.as_str(), score)
                })
        } else {
            MatchResult::miss()
        }
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(0.80)
    }
}

/// Order-insensitive similarity in [0, 100].
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    indel_ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `100 * (1 - indel_distance / (len_a + len_b))` over chars.
fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let distance = total - 2 * lcs_len(&a, &b);
    100.0 * (1.0 - distance as f64 / total as f64)
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
