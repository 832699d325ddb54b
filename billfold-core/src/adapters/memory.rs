//! In-memory document store
//!
//! A process-local store for tests and demos. Holds every path as raw
//! bytes and records JSON write-backs so tests can assert on persist
//! traffic. A store created with `pending` answers `Unknown`/`None`
//! until `resolve` is called, modeling a remote whose first fetch has
//! not completed yet.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::Existence;
use crate::ports::DocumentStore;

/// In-memory store keyed by path
#[derive(Default)]
pub struct MemoryStore {
    resolved: AtomicBool,
    files: Mutex<HashMap<String, Vec<u8>>>,
    json_writes: Mutex<Vec<(String, JsonValue)>>,
}

impl MemoryStore {
    /// Empty store whose observations resolve immediately
    pub fn new() -> Self {
        Self {
            resolved: AtomicBool::new(true),
            ..Default::default()
        }
    }

    /// Store whose existence checks answer `Unknown` and whose reads
    /// answer `None` until `resolve` is called
    pub fn pending() -> Self {
        Self {
            resolved: AtomicBool::new(false),
            ..Default::default()
        }
    }

    /// Let pending observations start resolving
    pub fn resolve(&self) {
        self.resolved.store(true, Ordering::SeqCst);
    }

    /// Seed a JSON value without recording it as a write-back
    pub fn insert_json(&self, path: &str, value: JsonValue) {
        let bytes = serde_json::to_vec(&value).expect("serializable value");
        self.files
            .lock()
            .expect("store mutex poisoned")
            .insert(path.to_string(), bytes);
    }

    /// Remove a path, as if the document were deleted remotely
    pub fn remove(&self, path: &str) {
        self.files
            .lock()
            .expect("store mutex poisoned")
            .remove(path);
    }

    /// Raw bytes currently stored at a path
    pub fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .expect("store mutex poisoned")
            .get(path)
            .cloned()
    }

    /// Number of JSON write-backs recorded for a path
    pub fn json_write_count(&self, path: &str) -> usize {
        self.json_writes
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    /// The most recent JSON write-back for a path
    pub fn last_json_write(&self, path: &str) -> Option<JsonValue> {
        self.json_writes
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn exists(&self, path: &str) -> Result<Existence> {
        if !self.resolved.load(Ordering::SeqCst) {
            return Ok(Existence::Unknown);
        }
        let present = self
            .files
            .lock()
            .expect("store mutex poisoned")
            .contains_key(path);
        Ok(if present {
            Existence::Present
        } else {
            Existence::Absent
        })
    }

    async fn read_json(&self, path: &str) -> Result<Option<JsonValue>> {
        if !self.resolved.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let bytes = self
            .files
            .lock()
            .expect("store mutex poisoned")
            .get(path)
            .cloned();
        match bytes {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(Error::Json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write_json(&self, path: &str, value: &JsonValue) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(Error::Json)?;
        self.files
            .lock()
            .expect("store mutex poisoned")
            .insert(path.to_string(), bytes);
        self.json_writes
            .lock()
            .expect("store mutex poisoned")
            .push((path.to_string(), value.clone()));
        Ok(())
    }

    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .expect("store mutex poisoned")
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}
