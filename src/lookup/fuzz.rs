//! Fuzzy stage: approximate matching over every name and alias.

use std::fmt;
use std::sync::Arc;

use crate::config::{FuzzConfig, LookupConfig};
use crate::entity::{collect_entities, Entity, EntitySource};
use crate::error::{LookupError, LookupResult};
use crate::lookup::{AliasLookup, Lookup};
use crate::matching::{Match, MatchList};
use crate::scorer::{default_scorer, Scorer};

/// Resolves keys by name, then alias, then approximate match.
///
/// The corpus holds one cleaned entry per canonical name and per alias, with
/// a parallel vector mapping each position back to its entity.
pub struct FuzzLookup {
    inner: AliasLookup,
    clean: Vec<String>,
    terms: Vec<String>,
    entities: Vec<Arc<Entity>>,
    scorer: Arc<dyn Scorer>,
    fuzz: FuzzConfig,
}

impl FuzzLookup {
    /// Builds all three stages from `source` with an injected scorer.
    ///
    /// # Errors
    /// - [`LookupError::Configuration`] if `scorer` is `None`
    /// - [`LookupError::InvalidConfig`] if the fuzzy settings are out of range
    /// - [`LookupError::Conflict`] for an unresolvable name or alias collision
    pub fn new<I, T>(
        source: I,
        config: &LookupConfig,
        scorer: Option<Arc<dyn Scorer>>,
    ) -> LookupResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        let scorer = scorer.ok_or_else(|| {
            LookupError::configuration("fuzzy lookup requires a scorer but none was supplied")
        })?;
        config.validate()?;

        let inner = AliasLookup::from_entities(
            collect_entities(source),
            config.case_sensitive,
            config.tiebreaker_mode,
        )?;

        let mut clean = Vec::new();
        let mut terms = Vec::new();
        let mut entities = Vec::new();
        for entity in inner.name_lookup().entities() {
            for term in entity.names() {
                clean.push(scorer.clean(term));
                terms.push(term.to_string());
                entities.push(Arc::clone(entity));
            }
        }
        tracing::debug!(
            corpus = clean.len(),
            limit = config.fuzz.limit,
            min_score = config.fuzz.min_score,
            "built fuzzy corpus"
        );

        Ok(Self {
            inner,
            clean,
            terms,
            entities,
            scorer,
            fuzz: config.fuzz.clone(),
        })
    }

    /// Builds the lookup with the built-in scorer named by `config.fuzz.scorer`.
    ///
    /// # Errors
    /// As [`FuzzLookup::new`]; the configuration error is returned when the
    /// built-in scorers are compiled out.
    pub fn with_default_scorer<I, T>(source: I, config: &LookupConfig) -> LookupResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        let scorer = default_scorer(config.fuzz.scorer)?;
        Self::new(source, config, Some(scorer))
    }

    /// The wrapped alias stage.
    #[must_use]
    pub fn alias_lookup(&self) -> &AliasLookup {
        &self.inner
    }

    /// Cleaned corpus, parallel to [`FuzzLookup::corpus_entities`].
    #[must_use]
    pub fn corpus(&self) -> &[String] {
        &self.clean
    }

    /// Owning entity of each corpus position.
    #[must_use]
    pub fn corpus_entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    fn fuzz_match(&self, key: &str) -> LookupResult<MatchList> {
        let query = self.scorer.clean(key);
        let mut matches: MatchList = self
            .scorer
            .extract(&query, &self.clean, self.fuzz.limit)
            .into_iter()
            .take(self.fuzz.limit)
            .filter_map(|hit| {
                let entity = self.entities.get(hit.index)?;
                let term = self.terms.get(hit.index)?.clone();
                let is_alias = hit.choice != self.scorer.clean(&entity.value);
                Some(Match {
                    key: hit.choice,
                    entity: Arc::clone(entity),
                    is_alias,
                    score: Some(hit.score),
                    term,
                })
            })
            .collect();

        matches.apply(key, self.fuzz.min_score, self.inner.name_lookup().tiebreaker_mode())?;
        Ok(matches)
    }
}

impl Lookup for FuzzLookup {
    fn lookup(&self, key: &str) -> LookupResult<MatchList> {
        let matches = self.inner.lookup(key)?;
        if !matches.is_empty() {
            return Ok(matches);
        }

        tracing::trace!(key, "no exact match, trying fuzzy");
        self.fuzz_match(key)
    }

    fn entity_count(&self) -> usize {
        self.inner.entity_count()
    }
}

impl fmt::Debug for FuzzLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzLookup")
            .field("inner", &self.inner)
            .field("corpus", &self.clean.len())
            .field("fuzz", &self.fuzz)
            .finish_non_exhaustive()
    }
}
