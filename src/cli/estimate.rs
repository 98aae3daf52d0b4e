//! Estimate CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_estimate_list;
use crate::error::TallyResult;
use crate::models::EstimateId;
use crate::services::{EstimateInput, EstimateService};
use crate::storage::Storage;

use super::{parse_amount, parse_month};

/// Estimate subcommands
#[derive(Subcommand)]
pub enum EstimateCommands {
    /// Set an expected spend for a category and month
    Add {
        /// Category name
        category: String,
        /// Amount (e.g., "300")
        amount: String,
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List estimates
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete an estimate
    Delete {
        /// Estimate ID (e.g., "est-2" or "2")
        id: EstimateId,
    },
}

/// Handle an estimate command
pub fn handle_estimate_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EstimateCommands,
) -> TallyResult<()> {
    let service = EstimateService::new(storage);

    match cmd {
        EstimateCommands::Add {
            category,
            amount,
            month,
        } => {
            let period = parse_month(month.as_deref())?;
            let estimate = service.add(EstimateInput::for_period(
                category,
                parse_amount(&amount)?,
                period,
            ))?;

            println!(
                "Added estimate {}: {} for {} in {}",
                estimate.id,
                settings.format_money(estimate.amount),
                estimate.category,
                period.label()
            );
        }

        EstimateCommands::List { month } => {
            let estimates = match month {
                Some(m) => service.list_for_month(parse_month(Some(&m))?)?,
                None => service.list()?,
            };
            print!("{}", format_estimate_list(&estimates, settings));
        }

        EstimateCommands::Delete { id } => {
            if service.delete(id)? {
                println!("Deleted {}", id);
            } else {
                println!("No estimate {}; nothing deleted", id);
            }
        }
    }

    Ok(())
}
