//! Outer resolution contract.
//!
//! A [`Resolver`] runs the full cascade of its lookup and turns the result
//! into a value according to the configured [`NotFoundMode`].

use std::fmt;
use std::sync::Arc;

use crate::config::NotFoundMode;
use crate::entity::Entity;
use crate::error::{LookupError, LookupResult};
use crate::lookup::Lookup;
use crate::matching::MatchList;

/// A resolved query.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The key resolved to an entity.
    Entity(Arc<Entity>),
    /// Nothing matched and the not-found mode passes the key through.
    Key(String),
}

impl Resolved {
    /// The canonical value, or the passed-through key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.value,
            Self::Key(key) => key,
        }
    }

    /// The entity, if the key resolved to one.
    #[must_use]
    pub fn entity(&self) -> Option<&Arc<Entity>> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies the not-found policy on top of a lookup chain.
///
/// Cloning is cheap; clones share the same immutable indices.
#[derive(Clone)]
pub struct Resolver {
    lookup: Arc<dyn Lookup>,
    notfound_mode: NotFoundMode,
}

impl Resolver {
    /// Wraps a lookup with the given not-found policy.
    pub fn new(lookup: Arc<dyn Lookup>, notfound_mode: NotFoundMode) -> Self {
        Self {
            lookup,
            notfound_mode,
        }
    }

    /// The configured not-found policy.
    #[must_use]
    pub fn notfound_mode(&self) -> NotFoundMode {
        self.notfound_mode
    }

    /// The raw match list for `key`, before any not-found handling.
    ///
    /// # Errors
    /// Returns [`LookupError::Conflict`] for an unresolvable query-time tie.
    pub fn matches(&self, key: &str) -> LookupResult<MatchList> {
        self.lookup.lookup(key)
    }

    /// The entity for `key`, if any, regardless of the not-found policy.
    ///
    /// # Errors
    /// Returns [`LookupError::Conflict`] for an unresolvable query-time tie.
    pub fn get(&self, key: &str) -> LookupResult<Option<Arc<Entity>>> {
        Ok(self.matches(key)?.entity().cloned())
    }

    /// Resolves `key` through the full cascade.
    ///
    /// # Errors
    /// - [`LookupError::NotFound`] when nothing matched and the mode is `raise`
    /// - [`LookupError::Conflict`] for an unresolvable query-time tie
    pub fn resolve(&self, key: &str) -> LookupResult<Option<Resolved>> {
        if let Some(entity) = self.get(key)? {
            return Ok(Some(Resolved::Entity(entity)));
        }

        tracing::trace!(key, mode = ?self.notfound_mode, "key not found");
        match self.notfound_mode {
            NotFoundMode::Raise => Err(LookupError::not_found(key)),
            NotFoundMode::None => Ok(None),
            NotFoundMode::Allow => Ok(Some(Resolved::Key(key.to_string()))),
        }
    }

    /// Like [`Resolver::resolve`], returning the canonical value string.
    ///
    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn resolve_value(&self, key: &str) -> LookupResult<Option<String>> {
        Ok(self.resolve(key)?.map(|r| r.as_str().to_string()))
    }

    /// Number of entities behind this resolver.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.lookup.entity_count()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("entities", &self.lookup.entity_count())
            .field("notfound_mode", &self.notfound_mode)
            .finish_non_exhaustive()
    }
}
