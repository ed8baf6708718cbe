//! Tie-break policy.
//!
//! One routine decides every collision, whether it comes from two entities
//! indexed under the same key or from fuzzy candidates sharing the best score.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{LookupError, LookupResult};

/// What to do when several entities compete for one key.
///
/// A single highest explicit priority always wins, whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakerMode {
    /// Fail with [`LookupError::Conflict`].
    #[default]
    Raise,
    /// Pick the entity whose value sorts first.
    #[serde(alias = "lesser")]
    Alphabetical,
    /// Pick the entity whose value sorts last.
    #[serde(rename = "greater", alias = "reverse_alphabetical")]
    ReverseAlphabetical,
}

impl TiebreakerMode {
    /// Returns a short stable identifier suitable for logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::Alphabetical => "alphabetical",
            Self::ReverseAlphabetical => "greater",
        }
    }
}

/// Picks a single winner among `candidates` competing for `key`.
///
/// Equal entities are collapsed first (first occurrence wins), so an entity
/// indexed twice under one key never conflicts with itself.
///
/// # Errors
/// Returns [`LookupError::Conflict`] in [`TiebreakerMode::Raise`] when no unique
/// highest priority separates the candidates. Returns it in every mode for an
/// empty candidate set.
pub fn break_tie(
    mode: TiebreakerMode,
    key: &str,
    candidates: &[Arc<Entity>],
) -> LookupResult<Arc<Entity>> {
    let mut distinct: Vec<&Arc<Entity>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !distinct
            .iter()
            .any(|seen| Arc::ptr_eq(*seen, candidate) || ***seen == **candidate)
        {
            distinct.push(candidate);
        }
    }

    match distinct.as_slice() {
        [] => {
            return Err(LookupError::Conflict {
                key: key.to_string(),
                candidates: Vec::new(),
            })
        }
        [only] => return Ok(Arc::clone(*only)),
        _ => {}
    }

    // Explicit priorities rank above absent ones.
    let top = distinct.iter().map(|e| e.priority).max().flatten();
    let contenders: Vec<&Arc<Entity>> = distinct
        .into_iter()
        .filter(|e| e.priority == top)
        .collect();

    if let [winner] = contenders.as_slice() {
        tracing::debug!(key, winner = %winner.value, "tie broken by priority");
        return Ok(Arc::clone(*winner));
    }

    let winner = match mode {
        TiebreakerMode::Raise => {
            return Err(LookupError::Conflict {
                key: key.to_string(),
                candidates: contenders.iter().map(|e| e.value.clone()).collect(),
            });
        }
        // `min_by`/`max_by` keep the first/last of equal elements; reverse the
        // max case so exact duplicates still resolve to the first inserted.
        TiebreakerMode::Alphabetical => contenders
            .iter()
            .min_by(|a, b| a.value.cmp(&b.value)),
        TiebreakerMode::ReverseAlphabetical => contenders
            .iter()
            .rev()
            .max_by(|a, b| a.value.cmp(&b.value)),
    };

    let winner = winner.ok_or_else(|| LookupError::Conflict {
        key: key.to_string(),
        candidates: Vec::new(),
    })?;
    tracing::debug!(key, mode = mode.name(), winner = %winner.value, "tie broken by policy");
    Ok(Arc::clone(*winner))
}
