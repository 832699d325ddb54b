//! Rename command - change the account user's display name

use anyhow::{Context, Result};

use super::{get_context, load_ready};
use crate::output;

pub async fn run(name: &str) -> Result<()> {
    let ctx = get_context()?;
    load_ready(&ctx).await?;

    let task = ctx.editor.rename(name).context("Rename rejected")?;
    task.wait().await.context("Failed to save the new name")?;

    output::success(&format!("Renamed account user to {}", name));
    Ok(())
}
