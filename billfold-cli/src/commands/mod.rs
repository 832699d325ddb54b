//! CLI command implementations

pub mod billing;
pub mod demo;
pub mod payment;
pub mod picture;
pub mod profile;
pub mod rename;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use billfold_core::adapters::{HttpStore, LocalDirStore};
use billfold_core::{AccountContext, AccountDocument, Error, SyncStatus};

/// Get the billfold directory from environment or default
pub fn get_billfold_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BILLFOLD_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".billfold")
    }
}

/// Build the account context against the configured store
///
/// `BILLFOLD_REMOTE_URL` (plus optional `BILLFOLD_TOKEN`) selects the
/// HTTP store; otherwise the local directory store under
/// `BILLFOLD_DIR` (default `~/.billfold`) is used.
pub fn get_context() -> Result<AccountContext> {
    if let Ok(url) = std::env::var("BILLFOLD_REMOTE_URL") {
        let mut store = HttpStore::new(url).context("Failed to create remote store client")?;
        if let Ok(token) = std::env::var("BILLFOLD_TOKEN") {
            store = store.with_token(token);
        }
        return Ok(AccountContext::new(Arc::new(store)));
    }

    let dir = get_billfold_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create billfold directory: {:?}", dir))?;
    Ok(AccountContext::new(Arc::new(LocalDirStore::new(dir))))
}

/// Refresh the context and return the ready snapshot
///
/// Mutating commands call this first so errors show up before any
/// intent is attempted.
pub async fn load_ready(ctx: &AccountContext) -> Result<AccountDocument> {
    let status = ctx
        .synchronizer
        .refresh()
        .await
        .context("Failed to load account data")?;

    match status {
        SyncStatus::Ready => Ok(ctx
            .synchronizer
            .snapshot()
            .expect("ready status implies a snapshot")),
        SyncStatus::Error => {
            Err(Error::DocumentNotFound).context("No account yet, run `bf demo` to seed one")
        }
        SyncStatus::Loading => bail!("account data is still loading, try again"),
    }
}
