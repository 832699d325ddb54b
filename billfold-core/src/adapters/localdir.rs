//! Local directory document store
//!
//! Maps store paths to files under a root directory. Existence checks
//! resolve immediately, so this adapter never answers `Unknown`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::Existence;
use crate::ports::DocumentStore;

/// Filesystem-backed document store rooted at a directory
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store path to a file path under the root
    ///
    /// Store paths are relative names within the account's repository;
    /// anything that would escape the root is rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.starts_with('/') || path.split('/').any(|part| part == "..") {
            return Err(Error::store(format!("path escapes store root: {}", path)));
        }
        Ok(self.root.join(path))
    }

    async fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalDirStore {
    async fn exists(&self, path: &str) -> Result<Existence> {
        let file = self.resolve(path)?;
        if tokio::fs::try_exists(&file).await? {
            Ok(Existence::Present)
        } else {
            Ok(Existence::Absent)
        }
    }

    async fn read_json(&self, path: &str) -> Result<Option<JsonValue>> {
        let file = self.resolve(path)?;
        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(Error::Json)?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn write_json(&self, path: &str, value: &JsonValue) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(Error::Json)?;
        self.write_bytes(path, &bytes).await
    }

    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.write_bytes(path, bytes).await
    }
}
