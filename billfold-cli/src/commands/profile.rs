//! Profile command - show the user profile

use anyhow::Result;
use colored::Colorize;

use super::{get_context, load_ready};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let doc = load_ready(&ctx).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.user)?);
        return Ok(());
    }

    println!("{}", "Profile Information".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Name", &doc.user.name]);
    table.add_row(vec!["Email", &doc.user.email]);
    table.add_row(vec![
        "Picture",
        doc.user.profile_picture.as_deref().unwrap_or("(none)"),
    ]);
    println!("{}", table);

    Ok(())
}
