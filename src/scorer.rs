//! Similarity scoring for the fuzzy stage.
//!
//! The fuzzy stage consumes scores through the [`Scorer`] trait and never
//! looks at how they are computed. The built-in scorers live behind the
//! `strsim` feature; without it callers must inject their own.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::LookupResult;

/// One ranked candidate returned by a scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// The matched choice string.
    pub choice: String,
    /// Similarity in `[0, 100]`.
    pub score: f64,
    /// Position of `choice` in the choices slice.
    pub index: usize,
}

/// Approximate string matcher injected into the fuzzy stage.
pub trait Scorer: Send + Sync {
    /// Returns at most `limit` candidates from `choices`, ranked by
    /// descending score. Equal scores keep corpus order.
    fn extract(&self, query: &str, choices: &[String], limit: usize) -> Vec<Extracted>;

    /// Normalizes corpus entries and queries before scoring.
    fn clean(&self, text: &str) -> String {
        default_process(text)
    }
}

/// Default cleaning: NFKC fold, lowercase, every run of non-alphanumeric
/// characters becomes a single space, ends trimmed.
#[must_use]
pub fn default_process(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ranks `(index, score)` pairs and keeps the top `limit`.
///
/// Shared by every scorer that computes one score per choice.
#[must_use]
pub fn rank<F>(query: &str, choices: &[String], limit: usize, score: F) -> Vec<Extracted>
where
    F: Fn(&str, &str) -> f64,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = choices
        .iter()
        .enumerate()
        .map(|(index, choice)| (index, score(query, choice.as_str()).clamp(0.0, 100.0)))
        .collect();
    // Stable sort: equal scores stay in corpus order.
    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(limit)
        .map(|(index, score)| Extracted {
            choice: choices[index].clone(),
            score,
            index,
        })
        .collect()
}

/// Selects one of the built-in scorers from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Compare with whitespace tokens sorted, so word order does not matter.
    #[default]
    #[serde(alias = "token_sort_ratio")]
    TokenSort,
    /// Compare the cleaned strings as they are.
    Ratio,
}

/// Builds the built-in scorer for `kind`.
///
/// # Errors
/// Returns [`crate::LookupError::Configuration`] when the crate was built without
/// the `strsim` feature.
#[cfg(feature = "strsim")]
pub fn default_scorer(kind: ScorerKind) -> LookupResult<Arc<dyn Scorer>> {
    Ok(match kind {
        ScorerKind::TokenSort => Arc::new(TokenSortScorer),
        ScorerKind::Ratio => Arc::new(RatioScorer),
    })
}

/// Builds the built-in scorer for `kind`.
///
/// # Errors
/// Always returns [`crate::LookupError::Configuration`]: the `strsim` feature is off.
#[cfg(not(feature = "strsim"))]
pub fn default_scorer(kind: ScorerKind) -> LookupResult<Arc<dyn Scorer>> {
    Err(crate::error::LookupError::configuration(format!(
        "fuzzy scorer {kind:?} requires the `strsim` feature; enable it or inject a Scorer"
    )))
}

/// Edit-distance similarity on `0..=100`.
#[cfg(feature = "strsim")]
fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_damerau_levenshtein(a, b) * 100.0
}

#[cfg(feature = "strsim")]
fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort ratio: both sides have their words sorted before comparison.
#[cfg(feature = "strsim")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortScorer;

#[cfg(feature = "strsim")]
impl Scorer for TokenSortScorer {
    fn extract(&self, query: &str, choices: &[String], limit: usize) -> Vec<Extracted> {
        let query = sort_tokens(query);
        rank(&query, choices, limit, |q, choice| ratio(q, &sort_tokens(choice)))
    }
}

/// Plain edit-distance ratio.
#[cfg(feature = "strsim")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioScorer;

#[cfg(feature = "strsim")]
impl Scorer for RatioScorer {
    fn extract(&self, query: &str, choices: &[String], limit: usize) -> Vec<Extracted> {
        rank(query, choices, limit, ratio)
    }
}
