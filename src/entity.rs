//! Entity types.
//!
//! An [`Entity`] is one canonical value of the vocabulary a lookup resolves
//! into. Entities are built once, wrapped in `Arc`, and shared read-only by
//! every index that references them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A canonical value with optional alternate names and priority.
///
/// # Examples
///
/// ```
/// use kyrolookup::Entity;
///
/// let entity = Entity::new("New York").with_aliases(["NYC", "Big Apple"]);
/// assert_eq!(entity.value, "New York");
/// assert_eq!(entity.aliases.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The canonical display string.
    pub value: String,

    /// Alternate strings that also resolve to this entity.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Ordering number used to break ties. Higher wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub meta: serde_json::Value,
}

impl Entity {
    /// Creates an entity with no aliases and no priority.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            aliases: Vec::new(),
            priority: None,
            label: None,
            meta: serde_json::Value::Null,
        }
    }

    /// Sets the aliases. Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.clear();
        for alias in aliases {
            let alias = alias.into();
            if !self.aliases.contains(&alias) {
                self.aliases.push(alias);
            }
        }
        self
    }

    /// Sets an explicit priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches opaque metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = meta;
        self
    }

    /// Iterates over the canonical value followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.value.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Raw construction input: either a bare string or a structured entity.
///
/// Converted exactly once, when a lookup is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntitySource {
    /// A bare name; becomes an entity with no aliases.
    Name(String),
    /// A fully specified entity.
    Entity(Entity),
}

impl EntitySource {
    /// Normalizes into a shared entity.
    #[must_use]
    pub fn into_entity(self) -> Arc<Entity> {
        match self {
            Self::Name(name) => Arc::new(Entity::new(name)),
            Self::Entity(entity) => Arc::new(entity),
        }
    }
}

impl From<&str> for EntitySource {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for EntitySource {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<Entity> for EntitySource {
    fn from(value: Entity) -> Self {
        Self::Entity(value)
    }
}

/// Converts a source collection into shared entities, preserving order.
pub(crate) fn collect_entities<I, T>(source: I) -> Vec<Arc<Entity>>
where
    I: IntoIterator<Item = T>,
    T: Into<EntitySource>,
{
    source
        .into_iter()
        .map(|item| item.into().into_entity())
        .collect()
}
