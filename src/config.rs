//! Lookup configuration.
//!
//! Plain serde structs with defaults so a lookup can be configured from
//! JSON (or any serde format) as well as in code.

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};
use crate::scorer::ScorerKind;
use crate::tiebreak::TiebreakerMode;

/// What the outer resolver returns when the cascade finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundMode {
    /// Fail with [`LookupError::NotFound`].
    #[default]
    Raise,
    /// Resolve to no value.
    None,
    /// Pass the query key through unresolved.
    Allow,
}

/// Fuzzy-stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzConfig {
    /// Maximum candidates requested from the scorer.
    pub limit: usize,
    /// Candidates scoring strictly below this are discarded.
    pub min_score: f64,
    /// Built-in scorer used when none is injected.
    pub scorer: ScorerKind,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            limit: 3,
            min_score: 80.0,
            scorer: ScorerKind::TokenSort,
        }
    }
}

impl FuzzConfig {
    /// Checks the ranges of every field.
    ///
    /// # Errors
    /// Returns [`LookupError::InvalidConfig`] for a zero limit or a minimum
    /// score outside `[0, 100]`.
    pub fn validate(&self) -> LookupResult<()> {
        if self.limit == 0 {
            return Err(LookupError::InvalidConfig {
                field: "fuzz.limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(LookupError::InvalidConfig {
                field: "fuzz.min_score",
                reason: format!("{} is outside [0, 100]", self.min_score),
            });
        }
        Ok(())
    }
}

/// Settings shared by every lookup stage and the outer resolver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Compare keys case-sensitively.
    pub case_sensitive: bool,
    /// Collision policy.
    pub tiebreaker_mode: TiebreakerMode,
    /// Behaviour on an empty result.
    pub notfound_mode: NotFoundMode,
    /// Fuzzy-stage settings; ignored by name and alias lookups.
    pub fuzz: FuzzConfig,
}

impl LookupConfig {
    /// Validates the whole configuration.
    ///
    /// # Errors
    /// See [`FuzzConfig::validate`].
    pub fn validate(&self) -> LookupResult<()> {
        self.fuzz.validate()
    }
}
