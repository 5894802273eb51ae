//! # Related Collections
//!
//! State of a one-to-many relation on an entity (Category → Products).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Relation States                                      │
//! │                                                                         │
//! │   NotLoaded ──── load ────► Loaded(Vec<T>)                              │
//! │      │                          │                                       │
//! │      │ items() == []            │ items() == rows fetched               │
//! │      │                          │                                       │
//! │      └──────────────────────────┴── a loaded relation is never          │
//! │                                     fetched again                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no third "fetch on first read" state: reading a relation never
//! touches the database.

use serde::{Deserialize, Serialize};

/// A related collection that is either loaded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum Related<T> {
    /// Nothing has been fetched for this relation.
    NotLoaded,
    /// The relation was fetched; the vector may be empty.
    Loaded(Vec<T>),
}

impl<T> Related<T> {
    /// Returns true once the relation has been fetched.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Related::Loaded(_))
    }

    /// Returns the loaded items, or an empty slice when not loaded.
    pub fn items(&self) -> &[T] {
        match self {
            Related::Loaded(items) => items,
            Related::NotLoaded => &[],
        }
    }

    /// Number of visible items (zero when not loaded).
    #[inline]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// True when no items are visible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Appends an item, marking the relation loaded.
    ///
    /// Used when assembling a relation row by row from a joined query.
    pub fn push(&mut self, item: T) {
        match self {
            Related::Loaded(items) => items.push(item),
            Related::NotLoaded => *self = Related::Loaded(vec![item]),
        }
    }

    /// Consumes the relation, returning its items (empty when not loaded).
    pub fn into_items(self) -> Vec<T> {
        match self {
            Related::Loaded(items) => items,
            Related::NotLoaded => Vec::new(),
        }
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Related::NotLoaded
    }
}
