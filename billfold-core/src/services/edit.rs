//! Edit service - optimistic local mutations with write-back
//!
//! Each accepted intent mutates the in-memory snapshot synchronously,
//! then issues one asynchronous persist of the entire updated document.
//! Persistence is last-writer-wins at whole-document granularity; a
//! failed persist keeps the optimistic state and reports the failure.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountDocument, PaymentMethod};
use crate::ports::{DocumentStore, PROFILE_DOC_PATH, PROFILE_PICTURE_PATH};
use crate::services::sync::AccountSynchronizer;

/// Handle to an in-flight persist
///
/// Dropping the handle detaches the write (fire-and-forget); hosts that
/// need completion, such as a CLI about to exit, can `wait` on it.
/// Failures are reported to the tracing sink either way.
#[derive(Debug)]
pub struct PersistTask {
    handle: JoinHandle<Result<()>>,
}

impl PersistTask {
    fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let result = fut.await;
            if let Err(ref e) = result {
                tracing::warn!(error = %e, "account document persist failed");
            }
            result
        });
        Self { handle }
    }

    /// Wait for the persist to complete
    pub async fn wait(self) -> Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::persistence(format!("persist task aborted: {}", e))),
        }
    }
}

/// Applies local mutation intents to the snapshot and persists them
///
/// Constructed with explicit dependencies; must be used from within a
/// tokio runtime since accepted intents spawn their persist task.
pub struct EditService {
    store: Arc<dyn DocumentStore>,
    sync: Arc<AccountSynchronizer>,
}

impl EditService {
    pub fn new(store: Arc<dyn DocumentStore>, sync: Arc<AccountSynchronizer>) -> Self {
        Self { store, sync }
    }

    /// Replace the user's display name
    ///
    /// Rejected when the proposed name trims to empty; the snapshot is
    /// left untouched and nothing persists. The accepted name is stored
    /// as given.
    pub fn rename(&self, name: &str) -> Result<PersistTask> {
        if name.trim().is_empty() {
            return Err(Error::validation("name cannot be empty"));
        }
        let name = name.to_string();
        let updated = self.sync.apply_edit(|doc| doc.user.name = name)?;
        Ok(self.persist(updated))
    }

    /// Flip the connection state of the payment method with the given id
    ///
    /// An unknown id leaves the sequence unchanged and never errors;
    /// stale UI state may reference methods that are already gone. The
    /// (possibly unchanged) document is persisted either way.
    pub fn toggle_payment_method(&self, id: &str) -> Result<PersistTask> {
        let updated = self.sync.apply_edit(|doc| {
            if let Some(method) = doc.payment_methods.iter_mut().find(|m| m.id == id) {
                method.is_connected = !method.is_connected;
            }
        })?;
        Ok(self.persist(updated))
    }

    /// Append a new payment method
    ///
    /// The method gets a fresh document-unique id, a display name
    /// derived from its type, and starts connected.
    pub fn add_payment_method(&self, kind: &str, value: &str) -> Result<PersistTask> {
        let method = PaymentMethod::new(kind, value);
        let updated = self.sync.apply_edit(|doc| doc.payment_methods.push(method))?;
        Ok(self.persist(updated))
    }

    /// Replace the profile picture
    ///
    /// Only JPEG data is accepted; any other encoding is rejected with
    /// no state change. On acceptance the bytes are written to the
    /// picture path, then the updated document is persisted, in that
    /// order within the intent.
    pub fn set_profile_picture(&self, bytes: Vec<u8>) -> Result<PersistTask> {
        if !is_jpeg(&bytes) {
            return Err(Error::unsupported_media("please upload a JPEG image"));
        }

        let updated = self
            .sync
            .apply_edit(|doc| doc.user.profile_picture = Some(PROFILE_PICTURE_PATH.to_string()))?;

        let store = Arc::clone(&self.store);
        Ok(PersistTask::spawn(async move {
            store
                .write_binary(PROFILE_PICTURE_PATH, &bytes)
                .await
                .map_err(|e| Error::persistence(e.to_string()))?;
            write_document(&store, &updated).await
        }))
    }

    /// Issue a fire-and-forget write of the full updated document
    fn persist(&self, doc: AccountDocument) -> PersistTask {
        let store = Arc::clone(&self.store);
        PersistTask::spawn(async move { write_document(&store, &doc).await })
    }
}

async fn write_document(store: &Arc<dyn DocumentStore>, doc: &AccountDocument) -> Result<()> {
    let value = serde_json::to_value(doc)?;
    store
        .write_json(PROFILE_DOC_PATH, &value)
        .await
        .map_err(|e| Error::persistence(e.to_string()))
}

/// Check the JPEG start-of-image signature
fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_signature_detection() {
        assert!(is_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]));
        // PNG signature
        assert!(!is_jpeg(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!is_jpeg(&[]));
        assert!(!is_jpeg(&[0xFF, 0xD8]));
    }
}
