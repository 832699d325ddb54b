//! Document store port
//!
//! Defines the interface to the remote document store: a key-value blob
//! store keyed by path within an account's repository. The core consumes
//! only this trait; concrete transports live in adapters.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::Result;
use crate::domain::Existence;

/// Path of the account document within the store
pub const PROFILE_DOC_PATH: &str = "profile.json";

/// Path of the profile picture within the store
pub const PROFILE_PICTURE_PATH: &str = "profile.jpg";

/// Remote document store abstraction
///
/// `exists` and `read_json` are observations that may not have resolved
/// yet on a remote transport: `Existence::Unknown` and `Ok(None)` both
/// mean "ask again later" rather than a confirmed answer. Confirmed
/// absence is signaled only by `exists` returning `Existence::Absent`.
///
/// Timeout and retry policy belong to implementations, not to the core.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether a path exists in the store
    async fn exists(&self, path: &str) -> Result<Existence>;

    /// Read a JSON value from the store
    ///
    /// Returns `None` while the value is not yet readable.
    async fn read_json(&self, path: &str) -> Result<Option<JsonValue>>;

    /// Write a JSON value to the store, replacing any previous content
    async fn write_json(&self, path: &str, value: &JsonValue) -> Result<()>;

    /// Write raw bytes to the store, replacing any previous content
    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<()>;
}
