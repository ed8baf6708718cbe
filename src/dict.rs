//! Key → entity index with case policy and collision handling.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::LookupResult;
use crate::tiebreak::{break_tie, TiebreakerMode};

/// Normalizes an index key according to the case policy.
#[must_use]
pub fn normalize_key(key: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        key.to_string()
    } else {
        key.to_lowercase()
    }
}

/// A read-only mapping from normalized key to entity.
///
/// A key claimed by several different entities is a tie, not an overwrite:
/// every candidate is collected first and the tie-break policy picks the one
/// the key finally maps to. Building either succeeds completely or fails
/// without exposing a partial index.
#[derive(Debug, Clone, Default)]
pub struct EntityDict {
    case_sensitive: bool,
    map: HashMap<String, Arc<Entity>>,
    order: Vec<String>,
}

impl EntityDict {
    /// Builds the dict from `(key, entity)` pairs.
    ///
    /// # Errors
    /// Returns [`crate::LookupError::Conflict`] when a key cannot be resolved
    /// under `mode`.
    pub fn build<I>(entries: I, case_sensitive: bool, mode: TiebreakerMode) -> LookupResult<Self>
    where
        I: IntoIterator<Item = (String, Arc<Entity>)>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut candidates: HashMap<String, Vec<Arc<Entity>>> = HashMap::new();

        for (key, entity) in entries {
            let key = normalize_key(&key, case_sensitive);
            let slot = candidates.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            slot.push(entity);
        }

        let mut map = HashMap::with_capacity(candidates.len());
        for key in &order {
            let Some(competing) = candidates.remove(key) else {
                continue;
            };
            let winner = if competing.len() == 1 {
                Arc::clone(&competing[0])
            } else {
                break_tie(mode, key, &competing)?
            };
            map.insert(key.clone(), winner);
        }

        Ok(Self {
            case_sensitive,
            map,
            order,
        })
    }

    /// Looks up `key` after applying the case policy.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<Entity>> {
        if self.case_sensitive {
            self.map.get(key)
        } else {
            self.map.get(&key.to_lowercase())
        }
    }

    /// Returns true if `key` is indexed.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Normalized keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether keys are compared case-sensitively.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, entity: &Arc<Entity>) -> (String, Arc<Entity>) {
        (key.to_string(), Arc::clone(entity))
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let ny = Arc::new(Entity::new("New York"));
        let dict = EntityDict::build([entry("New York", &ny)], false, TiebreakerMode::Raise).unwrap();
        assert!(dict.contains_key("new york"));
        assert!(dict.contains_key("NEW YORK"));
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["new york"]);
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let ny = Arc::new(Entity::new("New York"));
        let dict = EntityDict::build([entry("New York", &ny)], true, TiebreakerMode::Raise).unwrap();
        assert!(dict.contains_key("New York"));
        assert!(!dict.contains_key("new york"));
    }

    #[test]
    fn test_collision_raises() {
        let a = Arc::new(Entity::new("Springfield, IL"));
        let b = Arc::new(Entity::new("Springfield, MA"));
        let err = EntityDict::build(
            [entry("Springfield", &a), entry("springfield", &b)],
            false,
            TiebreakerMode::Raise,
        )
        .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_collision_alphabetical() {
        let a = Arc::new(Entity::new("Springfield, MA"));
        let b = Arc::new(Entity::new("Springfield, IL"));
        let dict = EntityDict::build(
            [entry("Springfield", &a), entry("Springfield", &b)],
            false,
            TiebreakerMode::Alphabetical,
        )
        .unwrap();
        assert_eq!(dict.get("springfield").unwrap().value, "Springfield, IL");
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_collision_resolved_with_late_priority() {
        // Pairwise resolution would fail on the first two; collecting all
        // candidates lets the prioritized third one win.
        let a = Arc::new(Entity::new("A"));
        let b = Arc::new(Entity::new("B"));
        let c = Arc::new(Entity::new("C").with_priority(1));
        let dict = EntityDict::build(
            [entry("k", &a), entry("k", &b), entry("k", &c)],
            false,
            TiebreakerMode::Raise,
        )
        .unwrap();
        assert_eq!(dict.get("k").unwrap().value, "C");
    }

    #[test]
    fn test_same_entity_twice_is_fine() {
        let a = Arc::new(Entity::new("A").with_aliases(["a"]));
        let dict = EntityDict::build([entry("a", &a), entry("A", &a)], false, TiebreakerMode::Raise).unwrap();
        assert_eq!(dict.len(), 1);
    }
}
