//! Canonical-name stage.

use std::sync::Arc;

use crate::dict::EntityDict;
use crate::entity::{collect_entities, Entity, EntitySource};
use crate::error::LookupResult;
use crate::lookup::Lookup;
use crate::matching::{Match, MatchList};
use crate::tiebreak::TiebreakerMode;

/// Resolves keys by exact canonical name.
#[derive(Debug, Clone)]
pub struct NameLookup {
    entities: Vec<Arc<Entity>>,
    names: EntityDict,
    tiebreaker_mode: TiebreakerMode,
}

impl NameLookup {
    /// Builds the name index from `source`.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] if two entities share a name
    /// and `tiebreaker_mode` cannot separate them.
    pub fn new<I, T>(source: I, case_sensitive: bool, tiebreaker_mode: TiebreakerMode) -> LookupResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<EntitySource>,
    {
        Self::from_entities(collect_entities(source), case_sensitive, tiebreaker_mode)
    }

    pub(crate) fn from_entities(
        entities: Vec<Arc<Entity>>,
        case_sensitive: bool,
        tiebreaker_mode: TiebreakerMode,
    ) -> LookupResult<Self> {
        let names = EntityDict::build(
            entities.iter().map(|e| (e.value.clone(), Arc::clone(e))),
            case_sensitive,
            tiebreaker_mode,
        )?;
        tracing::debug!(
            entities = entities.len(),
            keys = names.len(),
            case_sensitive,
            "built name index"
        );
        Ok(Self {
            entities,
            names,
            tiebreaker_mode,
        })
    }

    /// Entities in source order.
    #[must_use]
    pub fn entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.names.is_case_sensitive()
    }

    #[must_use]
    pub fn tiebreaker_mode(&self) -> TiebreakerMode {
        self.tiebreaker_mode
    }

    /// The underlying name index.
    #[must_use]
    pub fn names(&self) -> &EntityDict {
        &self.names
    }
}

impl Lookup for NameLookup {
    fn lookup(&self, key: &str) -> LookupResult<MatchList> {
        Ok(match self.names.get(key) {
            Some(entity) => MatchList::single(Match::exact(key, Arc::clone(entity))),
            None => MatchList::new(),
        })
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
