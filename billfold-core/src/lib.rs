//! Billfold Core - account settings synchronization
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (AccountDocument, PaymentMethod, etc.)
//! - **ports**: Trait definitions for external dependencies (DocumentStore)
//! - **services**: Business logic orchestration (synchronizer, edit service)
//! - **adapters**: Concrete implementations (in-memory, local directory, HTTP)
//!
//! The synchronizer fetches and validates the remote account document,
//! reconciles it into a stable in-memory snapshot, and derives a
//! loading/ready/error status. The edit service applies local mutation
//! intents optimistically and writes the full document back.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use ports::DocumentStore;
use services::{AccountSynchronizer, EditService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    AccountDocument, Billing, Existence, PaymentMethod, SyncStatus, UsageRecord, UserProfile,
};
pub use ports::{PROFILE_DOC_PATH, PROFILE_PICTURE_PATH};
pub use services::{PersistTask, SyncState};

/// Main context for billfold operations
///
/// The primary entry point for hosts. Holds the injected store and the
/// services wired to it; any front end drives the core through this.
pub struct AccountContext {
    pub store: Arc<dyn DocumentStore>,
    pub synchronizer: Arc<AccountSynchronizer>,
    pub editor: EditService,
}

impl AccountContext {
    /// Create a new context over an injected document store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let synchronizer = Arc::new(AccountSynchronizer::new(Arc::clone(&store)));
        let editor = EditService::new(Arc::clone(&store), Arc::clone(&synchronizer));

        Self {
            store,
            synchronizer,
            editor,
        }
    }
}
