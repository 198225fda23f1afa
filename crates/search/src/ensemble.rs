use crate::config::{EngineConfig, StrategyWeights};
use crate::exact::ExactMatcher;
use crate::fuzzy::FuzzyMatcher;
use crate::query_expansion::QueryExpander;
use crate::semantic::SemanticMatcher;
use crate::types::{Candidate, MatchResult, RankOutcome, Strategy, StrategyScore, VariantTrace};
use qa_vector_store::CorpusIndex;

/// Weighted vote of the three matchers across every query variant.
pub struct EnsembleRanker {
    exact: ExactMatcher,
    fuzzy: FuzzyMatcher,
    semantic: SemanticMatcher,
    expander: QueryExpander,
    weights: StrategyWeights,
    confidence_threshold: f32,
}

impl EnsembleRanker {
    #[must_use]
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            exact: ExactMatcher::new(),
            fuzzy: FuzzyMatcher::new(cfg.fuzzy_threshold),
            semantic: SemanticMatcher::new(cfg.semantic_threshold, cfg.embed_timeout()),
            expander: QueryExpander::new(&cfg.question_words),
            weights: cfg.weights,
            confidence_threshold: cfg.confidence_threshold,
        }
    }

    pub async fn rank(&self, query: &str, index: &CorpusIndex) -> Option<String> {
        self.rank_explained(query, index).await.answer
    }

    pub async fn rank_explained(&self, query: &str, index: &CorpusIndex) -> RankOutcome {
        let variants = self.expander.expand(query, index.normalizer());

        let mut traces = Vec::with_capacity(variants.len());
        let mut best: Option<Candidate> = None;
        let mut best_score = 0.0_f32;

        for (position, text) in variants.into_iter().enumerate() {
            let normalized = index.normalize(&text);

            let results = [
                (Strategy::Exact, self.exact.find_normalized(&normalized, index)),
                (Strategy::Fuzzy, self.fuzzy.find_normalized(&normalized, index)),
                (
                    Strategy::Semantic,
                    self.semantic.find_normalized(&normalized, index).await,
                ),
            ];

            let mut scores = Vec::with_capacity(results.len());
            let mut chosen: Option<(Strategy, &str, f32)> = None;
            for (strategy, result) in results {
                let weighted = result.score * self.weight(strategy);
                scores.push(StrategyScore {
                    strategy,
                    raw_score: result.score,
                    weighted_score: weighted,
                    matched: result.is_hit(),
                });

                let MatchResult {
                    answer: Some(answer),
                    ..
                } = result
                else {
                    continue;
                };
                // exact → fuzzy → semantic; the earlier strategy keeps a tie
                if chosen.map_or(true, |(_, _, score)| weighted > score) {
                    chosen = Some((strategy, answer, weighted));
                }
            }

            let chosen = chosen.map(|(strategy, answer, weighted_score)| Candidate {
                answer: answer.to_string(),
                weighted_score,
                strategy,
                variant: position,
            });

            log::debug!(
                "variant {position} {text:?}: {}",
                scores
                    .iter()
                    .map(|s| format!("{}={:.3}", s.strategy, s.weighted_score))
                    .collect::<Vec<_>>()
                    .join(" ")
            );

            if let Some(candidate) = &chosen {
                if candidate.weighted_score > best_score {
                    best_score = candidate.weighted_score;
                    best = Some(candidate.clone());
                }
            }

            traces.push(VariantTrace {
                text,
                normalized,
                scores,
                chosen,
            });
        }

        let answer = best
            .as_ref()
            .filter(|c| c.weighted_score >= self.confidence_threshold && !c.answer.is_empty())
            .map(|c| c.answer.clone());

        RankOutcome {
            query: query.to_string(),
            variants: traces,
            best,
            confidence_threshold: self.confidence_threshold,
            answer,
        }
    }

    const fn weight(&self, strategy: Strategy) -> f32 {
        match strategy {
            Strategy::Exact => self.weights.exact,
            Strategy::Fuzzy => self.weights.fuzzy,
            Strategy::Semantic => self.weights.semantic,
        }
    }
}

impl Default for EnsembleRanker {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{index_of, index_with};
    use pretty_assertions::assert_eq;
    use qa_vector_store::LookupEmbedder;
    use std::sync::Arc;

    #[tokio::test]
    async fn exact_hit_wins_with_full_weight() {
        let index = index_of(&[("What are CAT and FAT?", "Exams.")]).await;
        let outcome = EnsembleRanker::default()
            .rank_explained("what are cat and fat", &index)
            .await;
        let best = outcome.best.unwrap();
        assert_eq!(best.strategy, Strategy::Exact);
        assert_eq!(best.weighted_score, 1.0);
        assert_eq!(outcome.answer.as_deref(), Some("Exams."));
    }

    #[tokio::test]
    async fn exact_beats_tied_fuzzy_and_semantic() {
        let embedder = LookupEmbedder::new(1).with("mess menu", vec![1.0]).unwrap();
        let index = index_with(&[("Mess menu", "Weekly.")], Arc::new(embedder)).await;
        let cfg = EngineConfig {
            weights: StrategyWeights {
                exact: 1.0,
                fuzzy: 1.0,
                semantic: 1.0,
            },
            ..EngineConfig::default()
        };
        let outcome = EnsembleRanker::from_config(&cfg)
            .rank_explained("mess menu", &index)
            .await;
        let chosen = outcome.variants[0].chosen.clone().unwrap();
        assert_eq!(chosen.strategy, Strategy::Exact);
        assert_eq!(outcome.variants[0].scores.len(), 3);
    }

    #[tokio::test]
    async fn later_variant_needs_strictly_greater_score() {
        // Raw query and normalized form both hit exactly; the first variant is kept.
        let index = index_of(&[("hostel", "Block C.")]).await;
        let outcome = EnsembleRanker::default().rank_explained("Hostel", &index).await;
        assert_eq!(outcome.variants.len(), 2);
        assert_eq!(outcome.best.unwrap().variant, 0);
    }

    #[tokio::test]
    async fn empty_answer_is_no_answer() {
        let index = index_of(&[("Hostel fees", "")]).await;
        let outcome = EnsembleRanker::default().rank_explained("hostel fees", &index).await;
        assert!(outcome.best.is_some());
        assert_eq!(outcome.answer, None);
    }

    #[tokio::test]
    async fn empty_index_is_none() {
        let index = index_of(&[]).await;
        assert_eq!(EnsembleRanker::default().rank("anything at all", &index).await, None);
    }

    #[tokio::test]
    async fn traces_serialize() {
        let index = index_of(&[("Mess menu", "Weekly.")]).await;
        let outcome = EnsembleRanker::default().rank_explained("mess menu?", &index).await;
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["answer"], "Weekly.");
        assert_eq!(json["variants"][0]["scores"][1]["strategy"], "fuzzy");
    }
}
