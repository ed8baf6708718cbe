//! Fluent construction of resolvers.

use std::fmt;
use std::sync::Arc;

use crate::config::{LookupConfig, NotFoundMode};
use crate::entity::EntitySource;
use crate::error::LookupResult;
use crate::lookup::{AliasLookup, FuzzLookup, NameLookup};
use crate::resolver::Resolver;
use crate::scorer::{default_scorer, Scorer, ScorerKind};
use crate::tiebreak::TiebreakerMode;

/// Builder for [`Resolver`]s over name, alias, or fuzzy lookups.
///
/// # Example
/// ```
/// use kyrolookup::{Entity, LookupBuilder, NotFoundMode};
///
/// let resolver = LookupBuilder::new()
///     .notfound_mode(NotFoundMode::None)
///     .alias([Entity::new("New York").with_aliases(["NYC"])])?;
///
/// assert_eq!(resolver.resolve_value("nyc")?.as_deref(), Some("New York"));
/// assert_eq!(resolver.resolve_value("Boston")?, None);
/// # Ok::<(), kyrolookup::LookupError>(())
/// ```
#[derive(Clone, Default)]
pub struct LookupBuilder {
    config: LookupConfig,
    scorer: Option<Arc<dyn Scorer>>,
}

impl LookupBuilder {
    /// Creates a builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: LookupConfig) -> Self {
        self.config = config;
        self
    }

    /// Compare keys case-sensitively (default: false).
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.case_sensitive = case_sensitive;
        self
    }

    /// Collision policy (default: `raise`).
    #[must_use]
    pub fn tiebreaker_mode(mut self, mode: TiebreakerMode) -> Self {
        self.config.tiebreaker_mode = mode;
        self
    }

    /// Not-found policy (default: `raise`).
    #[must_use]
    pub fn notfound_mode(mut self, mode: NotFoundMode) -> Self {
        self.config.notfound_mode = mode;
        self
    }

    /// Maximum fuzzy candidates (default: 3).
    #[must_use]
    pub fn fuzz_limit(mut self, limit: usize) -> Self {
        self.config.fuzz.limit = limit;
        self
    }

    /// Minimum fuzzy score, inclusive (default: 80).
    #[must_use]
    pub fn fuzz_min_score(mut self, min_score: f64) -> Self {
        self.config.fuzz.min_score = min_score;
        self
    }

    /// Built-in scorer used when none is injected.
    #[must_use]
    pub fn fuzz_scorer(mut self, kind: ScorerKind) -> Self {
        self.config.fuzz.scorer = kind;
        self
    }

    /// Injects a custom scorer for the fuzzy stage.
    #[must_use]
    pub fn scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// The configuration collected so far.
    #[must_use]
    pub fn current_config(&self) -> &LookupConfig {
        &self.config
    }

    /// Builds a resolver matching canonical names only.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] for an unresolvable name collision.
    pub fn name<I, T>(self, source: I) -> LookupResult<Resolver>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        let lookup = NameLookup::new(source, self.config.case_sensitive, self.config.tiebreaker_mode)?;
        Ok(Resolver::new(Arc::new(lookup), self.config.notfound_mode))
    }

    /// Builds a resolver matching canonical names, then aliases.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] for an unresolvable collision.
    pub fn alias<I, T>(self, source: I) -> LookupResult<Resolver>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        let lookup = AliasLookup::new(source, self.config.case_sensitive, self.config.tiebreaker_mode)?;
        Ok(Resolver::new(Arc::new(lookup), self.config.notfound_mode))
    }

    /// Builds a resolver matching names, aliases, then approximate matches.
    ///
    /// Uses the injected scorer, or the built-in one named in the config.
    ///
    /// # Errors
    /// - [`crate::LookupError::Configuration`] if no scorer is available
    /// - [`crate::LookupError::InvalidConfig`] for out-of-range fuzzy settings
    /// - [`crate::LookupError::Conflict`] for an unresolvable collision
    pub fn fuzz<I, T>(self, source: I) -> LookupResult<Resolver>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        let scorer = match self.scorer {
            Some(scorer) => scorer,
            None => default_scorer(self.config.fuzz.scorer)?,
        };
        let lookup = FuzzLookup::new(source, &self.config, Some(scorer))?;
        Ok(Resolver::new(Arc::new(lookup), self.config.notfound_mode))
    }
}

impl fmt::Debug for LookupBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupBuilder")
            .field("config", &self.config)
            .field("custom_scorer", &self.scorer.is_some())
            .finish()
    }
}
