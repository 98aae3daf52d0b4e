//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{TallyError, TallyResult};
use crate::models::{TransactionId, TransactionKind};
use crate::reports::Overview;
use crate::services::{TransactionFilter, TransactionInput, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_month};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// "income" or "expense"
        kind: TransactionKind,
        /// Amount (e.g., "42.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// List transactions
    List {
        /// Only "income" or "expense"
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        /// Only this category name (exact match)
        #[arg(short, long)]
        category: Option<String>,
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (e.g., "txn-3" or "3")
        id: TransactionId,
    },

    /// Change a transaction; unspecified fields keep their value
    Edit {
        id: TransactionId,
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// New description ("" clears it)
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete { id: TransactionId },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let txn = service.add(TransactionInput {
                kind,
                amount: parse_amount(&amount)?,
                date: parse_date(date.as_deref())?,
                category,
                description,
            })?;

            println!(
                "Added {} {} of {} ({})",
                txn.kind,
                txn.id,
                settings.format_money(txn.amount),
                txn.category
            );
            print_balance(storage, settings)?;
        }

        TransactionCommands::List {
            kind,
            category,
            month,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if month.is_some() {
                filter = filter.month(parse_month(month.as_deref())?);
            }

            let transactions = service.list(&filter)?;
            print!("{}", format_transaction_register(&transactions, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let current = service
                .get(id)?
                .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

            if kind.is_none()
                && amount.is_none()
                && category.is_none()
                && date.is_none()
                && description.is_none()
            {
                println!("No changes specified. Use --type, --amount, --category, --date or --description.");
                return Ok(());
            }

            let input = TransactionInput {
                kind: kind.unwrap_or(current.kind),
                amount: match amount {
                    Some(a) => parse_amount(&a)?,
                    None => current.amount,
                },
                date: match date {
                    Some(d) => parse_date(Some(&d))?,
                    None => current.date,
                },
                category: category.unwrap_or(current.category),
                description: description.or(current.description),
            };

            let updated = service.update(id, input)?;
            println!("Updated {}", updated.id);
            print_balance(storage, settings)?;
        }

        TransactionCommands::Delete { id } => {
            if service.delete(id)? {
                println!("Deleted {}", id);
            } else {
                println!("No transaction {}; nothing deleted", id);
            }
            print_balance(storage, settings)?;
        }
    }

    Ok(())
}

/// Recompute the derived views and show the balance
fn print_balance(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let overview = Overview::generate(storage)?;
    println!(
        "Balance: {}",
        settings.format_money(overview.balance.balance)
    );
    Ok(())
}
