//! Billing command - show balance and usage history (read-only)

use anyhow::Result;
use colored::Colorize;

use super::{get_context, load_ready};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let doc = load_ready(&ctx).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.billing)?);
        return Ok(());
    }

    println!("{}", "Billing".bold());
    println!();
    println!(
        "Balance: {} {}",
        doc.billing.balance, doc.billing.currency
    );

    if doc.billing.usage_history.is_empty() {
        println!("No usage recorded yet.");
        return Ok(());
    }

    println!();
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Description", "Amount"]);
    for record in &doc.billing.usage_history {
        table.add_row(vec![
            record.date.to_string(),
            record.description.clone(),
            record.amount.to_string(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
