//! Derived sync status
//!
//! Status is never stored. It is recomputed from the latest existence
//! observation and the presence of a validated snapshot whenever either
//! input changes.

use serde::{Deserialize, Serialize};

/// Result of the store's existence check for the account document
///
/// `Unknown` means the check has not resolved yet, distinct from a
/// confirmed `Absent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Existence {
    #[default]
    Unknown,
    Present,
    Absent,
}

/// The loading/ready/error classification shown to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Loading,
    Ready,
    Error,
}

impl SyncStatus {
    /// Derive the status from the two external observations.
    ///
    /// A confirmed-absent document wins over a lingering snapshot; an
    /// unresolved existence check is always loading. A snapshot that
    /// failed to appear because the raw document never validated keeps
    /// the status at loading rather than crashing.
    pub fn derive(existence: Existence, has_snapshot: bool) -> Self {
        match existence {
            Existence::Absent => SyncStatus::Error,
            Existence::Unknown => SyncStatus::Loading,
            Existence::Present if has_snapshot => SyncStatus::Ready,
            Existence::Present => SyncStatus::Loading,
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Loading => write!(f, "loading"),
            SyncStatus::Ready => write!(f, "ready"),
            SyncStatus::Error => write!(f, "error"),
        }
    }
}
