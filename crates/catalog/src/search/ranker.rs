//! Ranking of scored candidates.

use super::fields::Searchable;
use super::scorer::{matched_terms, score, FieldWeights};
use super::tokenizer::tokenize;
use serde::Serialize;

/// Result cap used by the search services.
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// A record with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<R> {
    pub record: R,
    /// Always > 0 in ranked output
    pub score: f64,
    pub reason: Option<String>,
}

/// Score, filter, sort and cap `candidates` for `query`.
///
/// Ties keep candidate order. Blank queries yield nothing.
pub fn rank<R: Searchable>(
    candidates: impl IntoIterator<Item = R>,
    query: &str,
    limit: usize,
    weights: &FieldWeights,
) -> Vec<ScoredResult<R>> {
    let terms = tokenize(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredResult<R>> = candidates
        .into_iter()
        .filter_map(|record| {
            let s = score(&record, &terms, weights);
            (s > 0.0).then_some(ScoredResult {
                record,
                score: s,
                reason: None,
            })
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);

    for result in &mut scored {
        let matched = matched_terms(&result.record, &terms);
        result.reason = Some(format!("Matched on: {}", matched.join(", ")));
    }

    scored
}
