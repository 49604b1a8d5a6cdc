use serde::{Deserialize, Serialize};

/// Ordered set of category names.
///
/// Names compare by exact, case-sensitive string equality. Insertion order is
/// preserved so serialized ledgers and chart output stay reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `name` if absent; returns whether a new entry was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.iter().any(|existing| *existing == name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes `name` if present; returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
