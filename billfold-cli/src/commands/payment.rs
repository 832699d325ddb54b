//! Payment commands - list, add and toggle payment methods

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;

use super::{get_context, load_ready};
use crate::output;

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// List payment methods
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a payment method
    Add {
        /// Payment type (ethereum, wise, bank, ...)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Address or account identifier (prompted when omitted)
        #[arg(long)]
        value: Option<String>,
    },

    /// Toggle a payment method's connection state
    Toggle {
        /// Payment method id
        id: String,
    },
}

pub async fn run(command: PaymentCommands) -> Result<()> {
    match command {
        PaymentCommands::List { json } => list(json).await,
        PaymentCommands::Add { kind, value } => add(&kind, value).await,
        PaymentCommands::Toggle { id } => toggle(&id).await,
    }
}

async fn list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let doc = load_ready(&ctx).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.payment_methods)?);
        return Ok(());
    }

    if doc.payment_methods.is_empty() {
        println!("No payment methods connected yet.");
        return Ok(());
    }

    println!("{}", "Payment Methods".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Value", "Connected"]);
    for method in &doc.payment_methods {
        table.add_row(vec![
            method.id.as_str(),
            method.name.as_str(),
            method.value.as_str(),
            if method.is_connected { "yes" } else { "no" },
        ]);
    }
    println!("{}", table);

    Ok(())
}

async fn add(kind: &str, value: Option<String>) -> Result<()> {
    let value = match value {
        Some(value) => value,
        None => Input::new()
            .with_prompt("Address or account identifier")
            .interact_text()
            .context("Failed to read payment value")?,
    };

    let ctx = get_context()?;
    load_ready(&ctx).await?;

    let task = ctx
        .editor
        .add_payment_method(kind, &value)
        .context("Add rejected")?;
    task.wait().await.context("Failed to save payment method")?;

    let added = ctx
        .synchronizer
        .snapshot()
        .and_then(|doc| doc.payment_methods.last().cloned());
    match added {
        Some(method) => output::success(&format!("Added {} ({})", method.name, method.id)),
        None => output::success("Added payment method"),
    }
    Ok(())
}

async fn toggle(id: &str) -> Result<()> {
    let ctx = get_context()?;
    let doc = load_ready(&ctx).await?;

    let known = doc.payment_methods.iter().any(|m| m.id == id);

    let task = ctx
        .editor
        .toggle_payment_method(id)
        .context("Toggle rejected")?;
    task.wait().await.context("Failed to save payment method")?;

    if known {
        output::success(&format!("Toggled payment method {}", id));
    } else {
        output::warning(&format!("No payment method with id {}, nothing changed", id));
    }
    Ok(())
}
