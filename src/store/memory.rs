// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::broadcast;

/// A full, point-in-time view of one collection, in stable key order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub collection: String,
    pub docs: Vec<(String, Value)>,
}

/// In-process reactive document store.
///
/// Mirrors the managed store's client surface: `get`, `set` (full replace),
/// `update` (shallow merge) with an array-append helper, and per-collection
/// subscriptions that receive the full snapshot set on every change. Handles
/// are cheap clones sharing one state; the UI never mutates read documents
/// in place, all mutation funnels through writes here.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, Value>>,
    feeds: BTreeMap<String, broadcast::Sender<Snapshot>>,
}

const FEED_CAPACITY: usize = 64;

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        let inner = self.lock();
        inner.collections.get(collection)?.get(id).cloned()
    }

    /// Full document replace; creates the document if missing.
    pub fn set(&self, collection: &str, id: &str, doc: Value) {
        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), doc);
        Self::publish(&mut inner, collection);
    }

    /// Shallow merge of `partial`'s top-level fields into an existing
    /// document. Unlike `set`, updating a missing document is an error.
    pub fn update(&self, collection: &str, id: &str, partial: Value) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let doc = Self::existing_doc(&mut inner, collection, id)?;
        let Value::Object(target) = doc else {
            return Err(StoreError::NotAnObject {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        };
        let Value::Object(fields) = partial else {
            return Err(StoreError::PartialNotAnObject {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        };
        for (key, value) in fields {
            target.insert(key, value);
        }
        Self::publish(&mut inner, collection);
        Ok(())
    }

    /// The array-union helper: appends `element` to the array field `field`
    /// of an existing document (creating the array if the field is absent).
    pub fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        element: Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let doc = Self::existing_doc(&mut inner, collection, id)?;
        let Value::Object(target) = doc else {
            return Err(StoreError::NotAnObject {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        };
        match target
            .entry(field.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(element),
            _ => {
                return Err(StoreError::FieldNotAnArray {
                    collection: collection.to_owned(),
                    id: id.to_owned(),
                    field: field.to_owned(),
                })
            }
        }
        Self::publish(&mut inner, collection);
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) {
        let mut inner = self.lock();
        if let Some(docs) = inner.collections.get_mut(collection) {
            docs.remove(id);
        }
        Self::publish(&mut inner, collection);
    }

    /// The current full snapshot of a collection. Subscribers take this once
    /// at subscription time; the feed only carries subsequent changes.
    pub fn snapshot(&self, collection: &str) -> Snapshot {
        let inner = self.lock();
        Self::snapshot_locked(&inner, collection)
    }

    pub fn subscribe(&self, collection: &str) -> broadcast::Receiver<Snapshot> {
        let mut inner = self.lock();
        inner
            .feeds
            .entry(collection.to_owned())
            .or_insert_with(|| broadcast::channel(FEED_CAPACITY).0)
            .subscribe()
    }

    fn existing_doc<'a>(
        inner: &'a mut Inner,
        collection: &str,
        id: &str,
    ) -> Result<&'a mut Value, StoreError> {
        inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::MissingDocument {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })
    }

    fn snapshot_locked(inner: &Inner, collection: &str) -> Snapshot {
        let docs = inner
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Snapshot {
            collection: collection.to_owned(),
            docs,
        }
    }

    fn publish(inner: &mut Inner, collection: &str) {
        let snapshot = Self::snapshot_locked(inner, collection);
        if let Some(feed) = inner.feeds.get(collection) {
            // No receivers is fine; the snapshot is simply dropped.
            let _ = feed.send(snapshot);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    MissingDocument { collection: String, id: String },
    NotAnObject { collection: String, id: String },
    PartialNotAnObject { collection: String, id: String },
    FieldNotAnArray { collection: String, id: String, field: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDocument { collection, id } => {
                write!(f, "no document {collection}/{id}")
            }
            Self::NotAnObject { collection, id } => {
                write!(f, "document {collection}/{id} is not an object")
            }
            Self::PartialNotAnObject { collection, id } => {
                write!(f, "partial update for {collection}/{id} is not an object")
            }
            Self::FieldNotAnArray { collection, id, field } => {
                write!(f, "field '{field}' of {collection}/{id} is not an array")
            }
        }
    }
}

impl std::error::Error for StoreError {}
