//! Lookup stages.
//!
//! Each stage owns the stage it extends and consults it first:
//! [`FuzzLookup`] wraps [`AliasLookup`], which wraps [`NameLookup`]. A stage
//! only runs its own index when the inner stage came back empty.

pub mod alias;
pub mod fuzz;
pub mod name;

pub use alias::AliasLookup;
pub use fuzz::FuzzLookup;
pub use name::NameLookup;

use crate::error::LookupResult;
use crate::matching::MatchList;

/// A read-only resolver from query key to candidate matches.
///
/// Implementations are immutable after construction, so queries may run
/// concurrently without locking.
pub trait Lookup: Send + Sync {
    /// Resolves `key` through this stage and every stage it wraps.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] when a query-time tie cannot be
    /// broken. An empty [`MatchList`] means "not found" and is not an error.
    fn lookup(&self, key: &str) -> LookupResult<MatchList>;

    /// Number of entities the lookup was built from.
    fn entity_count(&self) -> usize;
}
