//! Path mappings shared by the schema and SQL extractors

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Required/optional classification of a leaf path
///
/// The numeric values are the ones SQL mapping scripts use, so a flag can be
/// compared directly with whatever integer the script carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// The field must be present
    Required = 1,
    /// The field may be absent
    Optional = 2,
}

impl Cardinality {
    /// `Required` when `required` holds, `Optional` otherwise
    pub fn from_required(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::Optional
        }
    }

    /// Numeric value (1 or 2)
    pub fn value(self) -> i64 {
        self as i64
    }

    /// Check if this is `Required`
    pub fn is_required(self) -> bool {
        self == Self::Required
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value())
    }
}

/// Ordered mapping from absolute path to a value
///
/// Inserting a path that is already present overwrites the value but keeps
/// the position of the first insertion. Overwrites are counted, never refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMap<V> {
    entries: IndexMap<String, V>,
    duplicates: usize,
}

impl<V> PathMap<V> {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            duplicates: 0,
        }
    }

    /// Insert or overwrite a path, returning the previous value
    pub fn insert(&mut self, path: impl Into<String>, value: V) -> Option<V> {
        let path = path.into();
        let previous = self.entries.insert(path.clone(), value);
        if previous.is_some() {
            self.duplicates += 1;
            warn!(path = %path, "duplicate path overwrites earlier entry");
        }
        previous
    }

    /// Value for a path
    pub fn get(&self, path: &str) -> Option<&V> {
        self.entries.get(path)
    }

    /// Check if a path is present
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserts that overwrote an existing path
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Paths with their values, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(path, value)| (path.as_str(), value))
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<V> Default for PathMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P: Into<String>> FromIterator<(P, V)> for PathMap<V> {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, value) in iter {
            map.insert(path, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for PathMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}
