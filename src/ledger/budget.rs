use serde::{Deserialize, Serialize};

/// A spending limit for a single category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetEntry {
    pub category: String,
    pub limit: f64,
}

/// Per-category budget limits, keyed by category name.
///
/// Entries keep the order they were first set in, and upserts overwrite in
/// place, so budget overviews render in a stable order. A budget may target a
/// category that is no longer registered; such orphans persist untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BudgetBook {
    entries: Vec<BudgetEntry>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the limit for `category`.
    pub fn upsert(&mut self, category: impl Into<String>, limit: f64) {
        let category = category.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.category == category)
        {
            entry.limit = limit;
        } else {
            self.entries.push(BudgetEntry { category, limit });
        }
    }

    /// Removes the entry for `category`; returns whether one existed.
    pub fn remove(&mut self, category: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.category != category);
        self.entries.len() != before
    }

    pub fn limit_for(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
