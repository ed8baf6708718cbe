//! # kyrolookup - Cascading entity resolution
//!
//! kyrolookup maps noisy, user-typed keys onto a fixed vocabulary of
//! canonical entities. A key is tried against canonical names first, then
//! against registered aliases, and finally against an approximate-match
//! corpus built from both.
//!
//! ## Core Concepts
//!
//! - **Entity**: a canonical value with optional aliases and priority
//! - **EntityDict**: a case-aware key index that treats collisions as ties
//! - **Lookup**: one stage of the cascade (name, alias, fuzzy)
//! - **MatchList**: the per-query result model
//! - **Resolver**: applies the not-found policy to a lookup chain
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kyrolookup::{Entity, LookupBuilder};
//!
//! let resolver = LookupBuilder::new()
//!     .fuzz_min_score(80.0)
//!     .fuzz([
//!         Entity::new("New York").with_aliases(["NYC", "Big Apple"]),
//!         Entity::new("Newark"),
//!     ])?;
//!
//! assert_eq!(resolver.resolve_value("New Yrok")?.as_deref(), Some("New York"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod config;
pub mod dict;
pub mod entity;
pub mod error;
pub mod lookup;
pub mod matching;
pub mod resolver;
pub mod scorer;
pub mod tiebreak;

// Re-export primary types at crate root for convenience
pub use builder::LookupBuilder;
pub use config::{FuzzConfig, LookupConfig, NotFoundMode};
pub use dict::EntityDict;
pub use entity::{Entity, EntitySource};
pub use error::{LookupError, LookupResult};
pub use lookup::{AliasLookup, FuzzLookup, Lookup, NameLookup};
pub use matching::{Match, MatchList};
pub use resolver::{Resolved, Resolver};
pub use scorer::{default_process, default_scorer, Extracted, Scorer, ScorerKind};
pub use tiebreak::{break_tie, TiebreakerMode};

#[cfg(feature = "strsim")]
pub use scorer::{RatioScorer, TokenSortScorer};
