//! Account synchronizer - reconcile remote document state into a stable
//! in-memory snapshot
//!
//! The synchronizer owns the snapshot: the last validated copy of the
//! account document. Each `refresh` observes the store and runs one
//! reconciliation step; hosts read `current` or `subscribe` for change
//! notifications. Observers are only woken on real state changes, so a
//! remote poll that returns an identical document does not trigger
//! downstream recomputes.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tokio::sync::watch;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountDocument, Existence, SyncStatus};
use crate::ports::{DocumentStore, PROFILE_DOC_PATH};

/// Snapshot plus the observations the status derives from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncState {
    /// Last validated account document, if any
    pub snapshot: Option<AccountDocument>,
    /// Latest existence-check result for the account document
    pub existence: Existence,
    /// Most recent validation failure, cleared by the next successful
    /// reconciliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl SyncState {
    /// Derive the current loading/ready/error status
    pub fn status(&self) -> SyncStatus {
        SyncStatus::derive(self.existence, self.snapshot.is_some())
    }
}

/// Synchronizes the account document between the store and memory
pub struct AccountSynchronizer {
    store: Arc<dyn DocumentStore>,
    state: watch::Sender<SyncState>,
}

impl AccountSynchronizer {
    /// Create a synchronizer over an injected store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self { store, state }
    }

    /// Current state (snapshot + observations), cloned
    pub fn current(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Current snapshot, if a document has validated yet
    pub fn snapshot(&self) -> Option<AccountDocument> {
        self.state.borrow().snapshot.clone()
    }

    /// Current derived status
    pub fn status(&self) -> SyncStatus {
        self.state.borrow().status()
    }

    /// Register for change notifications
    ///
    /// The receiver is woken only when the state actually changed; any
    /// front end can drive its rendering from this.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Observe the store once and reconcile what it returned
    ///
    /// Re-checks existence each time, so a document created after a
    /// not-found session becomes visible on the next refresh. Returns
    /// `InvalidDocument` when present raw data fails validation; the
    /// previous snapshot is kept in that case.
    pub async fn refresh(&self) -> Result<SyncStatus> {
        let existence = self.store.exists(PROFILE_DOC_PATH).await?;
        self.state.send_if_modified(|s| {
            if s.existence == existence {
                false
            } else {
                s.existence = existence;
                true
            }
        });

        if existence == Existence::Absent {
            tracing::debug!(path = PROFILE_DOC_PATH, "account document not found");
            return Ok(self.status());
        }

        if let Some(raw) = self.store.read_json(PROFILE_DOC_PATH).await? {
            self.reconcile(raw)?;
        }

        Ok(self.status())
    }

    /// Run one reconciliation step against a raw store value
    ///
    /// Returns whether the snapshot was replaced. Validation failure
    /// never overwrites an existing snapshot: stale-but-valid data is
    /// preferred over no data.
    pub fn reconcile(&self, raw: JsonValue) -> Result<bool> {
        let doc = match AccountDocument::from_raw(raw) {
            Ok(doc) => doc,
            Err(e) => {
                let msg = e.to_string();
                tracing::warn!(error = %msg, "account document failed validation");
                self.state.send_if_modified(|s| {
                    if s.last_error.as_deref() == Some(msg.as_str()) {
                        false
                    } else {
                        s.last_error = Some(msg.clone());
                        true
                    }
                });
                return Err(e);
            }
        };

        let mut replaced = false;
        self.state.send_if_modified(|s| {
            let mut changed = s.last_error.take().is_some();
            // Structural equality short-circuit: identical remote data
            // must not wake observers
            if s.snapshot.as_ref() != Some(&doc) {
                s.snapshot = Some(doc);
                replaced = true;
                changed = true;
            }
            changed
        });

        if replaced {
            tracing::debug!("snapshot replaced from remote document");
        }
        Ok(replaced)
    }

    /// Apply a local mutation to the snapshot and return the updated
    /// document for persistence
    ///
    /// Used by the edit service only. Observers are notified of the
    /// optimistic change before any persist completes.
    pub(crate) fn apply_edit<F>(&self, mutate: F) -> Result<AccountDocument>
    where
        F: FnOnce(&mut AccountDocument),
    {
        let mut updated = None;
        self.state.send_if_modified(|s| match s.snapshot.as_mut() {
            Some(doc) => {
                mutate(doc);
                updated = Some(doc.clone());
                true
            }
            None => false,
        });
        updated.ok_or(Error::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use serde_json::json;

    fn raw_document() -> JsonValue {
        json!({
            "user": { "name": "Jane Doe", "email": "jane@x.com" },
            "paymentMethods": [],
            "billing": { "balance": 0, "currency": "USD", "usageHistory": [] }
        })
    }

    fn synchronizer() -> AccountSynchronizer {
        AccountSynchronizer::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_first_reconcile_replaces() {
        let sync = synchronizer();
        assert!(sync.reconcile(raw_document()).unwrap());
        assert_eq!(sync.snapshot().unwrap().user.name, "Jane Doe");
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let sync = synchronizer();
        let mut rx = sync.subscribe();

        assert!(sync.reconcile(raw_document()).unwrap());
        rx.borrow_and_update();

        // Same raw document again: no replacement, no wake-up
        assert!(!sync.reconcile(raw_document()).unwrap());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_invalid_document_keeps_prior_snapshot() {
        let sync = synchronizer();
        sync.reconcile(raw_document()).unwrap();

        let err = sync.reconcile(json!({ "user": {} })).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
        assert_eq!(sync.snapshot().unwrap().user.name, "Jane Doe");
        assert!(sync.current().last_error.is_some());
    }

    #[test]
    fn test_successful_reconcile_clears_error() {
        let sync = synchronizer();
        sync.reconcile(json!({})).unwrap_err();
        assert!(sync.current().last_error.is_some());

        sync.reconcile(raw_document()).unwrap();
        assert!(sync.current().last_error.is_none());
    }

    #[test]
    fn test_apply_edit_without_snapshot_is_rejected() {
        let sync = synchronizer();
        let err = sync.apply_edit(|doc| doc.user.name.clear()).unwrap_err();
        assert!(matches!(err, Error::NotLoaded));
    }

    #[tokio::test]
    async fn test_refresh_reports_store_observations() {
        let store = Arc::new(MemoryStore::new());
        store.insert_json(PROFILE_DOC_PATH, raw_document());
        let sync = AccountSynchronizer::new(store);

        assert_eq!(sync.refresh().await.unwrap(), SyncStatus::Ready);
        assert_eq!(sync.current().existence, Existence::Present);
    }
}
