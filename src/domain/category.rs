//! Registry of the category names expenses may be tagged with.

use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// Result of [`CategoryRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Insertion-ordered set of unique category names. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `name` unless it is already registered. Matching is exact.
    pub fn add(&mut self, name: impl Into<String>) -> AddOutcome {
        let name = name.into();
        if self.contains(&name) {
            AddOutcome::AlreadyPresent
        } else {
            self.names.push(name);
            AddOutcome::Added
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn list(&self) -> &[String] {
        &self.names
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

/// Trims a user-supplied category name, rejecting blank input.
pub fn normalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExpenseError::InvalidInput(
            "category name cannot be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}
