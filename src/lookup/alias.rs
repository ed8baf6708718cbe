//! Alias stage: canonical names first, then aliases.

use std::sync::Arc;

use crate::dict::EntityDict;
use crate::entity::{collect_entities, Entity, EntitySource};
use crate::error::LookupResult;
use crate::lookup::{Lookup, NameLookup};
use crate::matching::{Match, MatchList};
use crate::tiebreak::TiebreakerMode;

/// Resolves keys by canonical name, falling back to registered aliases.
///
/// The name index is always consulted first, so an alias can never shadow
/// another entity's canonical name.
#[derive(Debug, Clone)]
pub struct AliasLookup {
    names: NameLookup,
    aliases: EntityDict,
}

impl AliasLookup {
    /// Builds the name and alias indices from `source`.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] if a name or alias is claimed by
    /// several entities that `tiebreaker_mode` cannot separate.
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
        let names = NameLookup::from_entities(entities, case_sensitive, tiebreaker_mode)?;
        let aliases = EntityDict::build(
            names.entities().iter().flat_map(|e| {
                e.aliases
                    .iter()
                    .map(move |alias| (alias.clone(), Arc::clone(e)))
            }),
            case_sensitive,
            tiebreaker_mode,
        )?;
        tracing::debug!(keys = aliases.len(), "built alias index");
        Ok(Self { names, aliases })
    }

    /// The wrapped name stage.
    #[must_use]
    pub fn name_lookup(&self) -> &NameLookup {
        &self.names
    }

    /// The underlying alias index.
    #[must_use]
    pub fn aliases(&self) -> &EntityDict {
        &self.aliases
    }
}

impl Lookup for AliasLookup {
    fn lookup(&self, key: &str) -> LookupResult<MatchList> {
        let matches = self.names.lookup(key)?;
        if !matches.is_empty() {
            return Ok(matches);
        }

        tracing::trace!(key, "no name match, trying aliases");
        Ok(match self.aliases.get(key) {
            Some(entity) => MatchList::single(Match::alias(key, Arc::clone(entity))),
            None => MatchList::new(),
        })
    }

    fn entity_count(&self) -> usize {
        self.names.entity_count()
    }
}
