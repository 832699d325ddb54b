//! Status command - show account sync status

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Existence and validation problems show up in the state itself
    let _ = ctx.synchronizer.refresh().await;
    let state = ctx.synchronizer.current();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("{}", "Account Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Status", &state.status().to_string()]);
    table.add_row(vec![
        "Document",
        &format!("{:?}", state.existence).to_lowercase(),
    ]);
    if let Some(snapshot) = &state.snapshot {
        table.add_row(vec!["User", &snapshot.user.name]);
        table.add_row(vec![
            "Payment methods",
            &snapshot.payment_methods.len().to_string(),
        ]);
    }
    println!("{}", table);

    if let Some(err) = &state.last_error {
        println!();
        output::warning(&format!("Last validation error: {}", err));
    }

    Ok(())
}
