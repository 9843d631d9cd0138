//! Loadable, keyed record lists shared by the domain slices.
//!
//! DESIGN
//! ======
//! Backend lists arrive whole and are then edited record by record. A
//! [`Collection`] keeps arrival order in a `Vec` and an id index beside it so
//! upserts and removals stay cheap while rendering keeps a stable order.
//! Load status is explicit so pages can tell "not asked yet" from "empty".

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use std::collections::HashMap;

use crate::error::ApiError;
use crate::net::types::{Category, Document, Job, Notification, Service};

/// Records with a stable backend id.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed_by_id!(Category, Service, Job, Notification, Document);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    pub load: LoadState,
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { load: LoadState::Idle, items: Vec::new(), index: HashMap::new() }
    }
}

impl<T: Keyed> Collection<T> {
    /// Mark a fetch in flight. Existing items stay visible.
    pub fn begin(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Replace all items with a fresh list. Later duplicates of an id win.
    pub fn receive(&mut self, items: Vec<T>) {
        self.items.clear();
        self.index.clear();
        for item in items {
            self.upsert(item);
        }
        self.load = LoadState::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    /// Apply a list response: replace on success, keep items and record the
    /// display message on failure.
    pub fn settle(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => self.receive(items),
            Err(e) => {
                log::warn!("list request failed: {e}");
                self.fail(e.user_message());
            }
        }
    }

    /// Insert `item`, or replace the record with the same id in place.
    pub fn upsert(&mut self, item: T) {
        if let Some(&pos) = self.index.get(item.key()) {
            self.items[pos] = item;
            return;
        }
        self.index.insert(item.key().to_owned(), self.items.len());
        self.items.push(item);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.index.remove(id)?;
        let removed = self.items.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                f(&mut self.items[pos]);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
