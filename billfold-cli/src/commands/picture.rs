//! Picture command - replace the profile picture

use std::path::Path;

use anyhow::{Context, Result};

use super::{get_context, load_ready};
use crate::output;

pub async fn run(file: &Path) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read image file: {:?}", file))?;

    let ctx = get_context()?;
    load_ready(&ctx).await?;

    let task = ctx
        .editor
        .set_profile_picture(bytes)
        .context("Picture rejected")?;
    task.wait().await.context("Failed to save the picture")?;

    output::success("Profile picture updated");
    Ok(())
}
