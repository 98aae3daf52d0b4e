//! Report CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::TallyResult;
use crate::reports::{
    BalanceSummary, CategoryComparison, CategoryTotals, EstimateComparison, MonthlySeries,
};
use crate::storage::Storage;

use super::parse_month;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total income, total expenses and the balance
    Balance,

    /// Income and expenses per month
    #[command(alias = "trend")]
    Monthly,

    /// Expense totals per category
    #[command(alias = "spending")]
    Categories,

    /// Estimated versus actual spending per month
    Compare,

    /// Estimated versus actual spending per category for one month
    Month {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TallyResult<()> {
    let currency = settings.currency_symbol.as_str();

    let output = match cmd {
        ReportCommands::Balance => BalanceSummary::generate(storage)?.format_terminal(currency),
        ReportCommands::Monthly => MonthlySeries::generate(storage)?.format_terminal(currency),
        ReportCommands::Categories => CategoryTotals::generate(storage)?.format_terminal(currency),
        ReportCommands::Compare => EstimateComparison::generate(storage)?.format_terminal(currency),
        ReportCommands::Month { month } => {
            let period = parse_month(month.as_deref())?;
            CategoryComparison::generate(storage, period)?.format_terminal(currency)
        }
    };

    print!("{}", output);
    Ok(())
}
