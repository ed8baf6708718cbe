//! Lookup result model.
//!
//! A [`MatchList`] is created fresh for every query. Exact and alias matches
//! carry no score and always rank above fuzzy ones.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::LookupResult;
use crate::tiebreak::{break_tie, TiebreakerMode};

/// Score assumed for matches that carry none (exact and alias hits).
pub const MAX_SCORE: f64 = 100.0;

/// One candidate resolution of a query key.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The query key, or the matched cleaned string for fuzzy hits.
    pub key: String,
    /// The resolved entity.
    pub entity: Arc<Entity>,
    /// Whether resolution went through an alias.
    pub is_alias: bool,
    /// Similarity in `[0, 100]` for fuzzy hits; `None` for exact/alias hits.
    pub score: Option<f64>,
    /// The indexed name or alias that produced the match.
    pub term: String,
}

impl Match {
    /// An exact hit on the canonical name.
    #[must_use]
    pub fn exact(key: impl Into<String>, entity: Arc<Entity>) -> Self {
        let term = entity.value.clone();
        Self {
            key: key.into(),
            entity,
            is_alias: false,
            score: None,
            term,
        }
    }

    /// An exact hit on an alias.
    #[must_use]
    pub fn alias(key: impl Into<String>, entity: Arc<Entity>) -> Self {
        let key = key.into();
        Self {
            term: key.clone(),
            key,
            entity,
            is_alias: true,
            score: None,
        }
    }

    /// The score, with `None` treated as maximal confidence.
    #[must_use]
    pub fn effective_score(&self) -> f64 {
        self.score.unwrap_or(MAX_SCORE)
    }

    /// Canonical value of the resolved entity.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.entity.value
    }
}

/// Zero or more matches ordered by descending confidence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchList {
    matches: Vec<Match>,
}

impl MatchList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding a single match.
    #[must_use]
    pub fn single(m: Match) -> Self {
        Self { matches: vec![m] }
    }

    /// Appends a match.
    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The most confident match.
    #[must_use]
    pub fn first(&self) -> Option<&Match> {
        self.matches.first()
    }

    /// The entity of the most confident match.
    #[must_use]
    pub fn entity(&self) -> Option<&Arc<Entity>> {
        self.first().map(|m| &m.entity)
    }

    /// Iterates over the matches.
    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// Filters fuzzy candidates down to at most one.
    ///
    /// Candidates scoring strictly below `min_score` are dropped. Among the
    /// survivors only those sharing the best score remain; several distinct
    /// entities at that score go through the tie-break policy for `query`.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] when the policy cannot choose.
    pub fn apply(
        &mut self,
        query: &str,
        min_score: f64,
        mode: TiebreakerMode,
    ) -> LookupResult<()> {
        self.matches.retain(|m| m.effective_score() >= min_score);
        self.matches.sort_by(|a, b| {
            b.effective_score()
                .partial_cmp(&a.effective_score())
                .unwrap_or(Ordering::Equal)
        });

        let Some(best) = self.matches.first().map(Match::effective_score) else {
            return Ok(());
        };
        self.matches.retain(|m| m.effective_score() == best);

        if self.matches.len() > 1 {
            let competing: Vec<Arc<Entity>> =
                self.matches.iter().map(|m| Arc::clone(&m.entity)).collect();
            let winner = break_tie(mode, query, &competing)?;
            self.matches.retain(|m| *m.entity == *winner);
            self.matches.truncate(1);
        }
        Ok(())
    }
}

impl IntoIterator for MatchList {
    type Item = Match;
    type IntoIter = std::vec::IntoIter<Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchList {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl FromIterator<Match> for MatchList {
    fn from_iter<T: IntoIterator<Item = Match>>(iter: T) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}
