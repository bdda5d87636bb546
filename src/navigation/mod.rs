//! Per-collection navigation state
//!
//! Each of the three collections is either in list view (`None`) or showing
//! one item in detail (`Some(index)`). The state is owned by whoever drives
//! the UI (one per session) and the operations here never touch anything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The collections a visitor can browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    DataDemo,
    Blog,
    ModelDemo,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::DataDemo,
        Collection::Blog,
        Collection::ModelDemo,
    ];

    /// URL slug of the collection
    pub fn slug(self) -> &'static str {
        match self {
            Collection::DataDemo => "data-demo",
            Collection::Blog => "blog",
            Collection::ModelDemo => "model-demo",
        }
    }

    /// Heading shown above the list view
    pub fn heading(self) -> &'static str {
        match self {
            Collection::DataDemo => "Data Demo Posts",
            Collection::Blog => "Blog Posts",
            Collection::ModelDemo => "Model Demos",
        }
    }

    /// Label of the button that returns to the list view
    pub fn back_label(self) -> &'static str {
        match self {
            Collection::DataDemo => "Back to Data Posts",
            Collection::Blog => "Back to Blog Posts",
            Collection::ModelDemo => "Back to Model List",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Collection {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data-demo" | "data" => Ok(Collection::DataDemo),
            "blog" => Ok(Collection::Blog),
            "model-demo" | "model" => Ok(Collection::ModelDemo),
            _ => Err(NavError::UnknownCollection(s.to_string())),
        }
    }
}

/// Navigation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("index {index} is out of range for {collection} ({len} items)")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

/// Selection within one collection: `None` is list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState(Option<usize>);

impl SelectionState {
    pub fn current(self) -> Option<usize> {
        self.0
    }
}

/// Selection state for all three collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    data_demo: SelectionState,
    blog: SelectionState,
    model_demo: SelectionState,
}

impl NavigationState {
    /// Fresh state with every collection in list view
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, collection: Collection) -> &SelectionState {
        match collection {
            Collection::DataDemo => &self.data_demo,
            Collection::Blog => &self.blog,
            Collection::ModelDemo => &self.model_demo,
        }
    }

    fn slot_mut(&mut self, collection: Collection) -> &mut SelectionState {
        match collection {
            Collection::DataDemo => &mut self.data_demo,
            Collection::Blog => &mut self.blog,
            Collection::ModelDemo => &mut self.model_demo,
        }
    }

    /// Show item `index` of a collection holding `len` items in detail view
    ///
    /// Works from list view and from detail view (the index is overwritten).
    /// An out-of-range index leaves the state untouched.
    pub fn select(
        &mut self,
        collection: Collection,
        index: usize,
        len: usize,
    ) -> Result<(), NavError> {
        if index >= len {
            return Err(NavError::IndexOutOfRange {
                collection,
                index,
                len,
            });
        }
        self.slot_mut(collection).0 = Some(index);
        tracing::debug!("Selected {} #{}", collection, index);
        Ok(())
    }

    /// Return to list view. Idempotent.
    pub fn go_back(&mut self, collection: Collection) {
        self.slot_mut(collection).0 = None;
    }

    /// Index shown in detail view, if any
    pub fn current(&self, collection: Collection) -> Option<usize> {
        self.slot(collection).current()
    }

    /// The selected item, if the selection still fits `items`
    pub fn resolve<'a, T>(&self, collection: Collection, items: &'a [T]) -> Option<&'a T> {
        self.current(collection).and_then(|i| items.get(i))
    }

    /// Drop a selection that no longer fits a collection of `len` items
    ///
    /// Returns true if the selection was reset.
    pub fn reset_stale(&mut self, collection: Collection, len: usize) -> bool {
        match self.current(collection) {
            Some(index) if index >= len => {
                tracing::debug!("Resetting stale {} selection #{}", collection, index);
                self.go_back(collection);
                true
            }
            _ => false,
        }
    }
}
