//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. The
//! synchronizer owns the snapshot; the edit service applies local
//! mutation intents to it and writes them back.

mod edit;
mod sync;

pub use edit::{EditService, PersistTask};
pub use sync::{AccountSynchronizer, SyncState};
