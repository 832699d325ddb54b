//! Demo command - seed the store with a demo account document

use anyhow::{Context, Result};
use billfold_core::ports::DocumentStore;
use billfold_core::{AccountDocument, PROFILE_DOC_PATH};

use super::get_context;
use crate::output;

pub async fn run() -> Result<()> {
    let ctx = get_context()?;

    let value = serde_json::to_value(AccountDocument::demo())?;
    ctx.store
        .write_json(PROFILE_DOC_PATH, &value)
        .await
        .context("Failed to write demo document")?;

    output::success("Seeded demo account document at profile.json");
    Ok(())
}
