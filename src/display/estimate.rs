//! Estimate display formatting

use crate::config::Settings;
use crate::models::{display_name, Estimate};

use super::transaction::truncate;

/// Estimates grouped by month, oldest month first
pub fn format_estimate_list(estimates: &[Estimate], settings: &Settings) -> String {
    if estimates.is_empty() {
        return "No estimates found.\n".to_string();
    }

    let mut sorted: Vec<&Estimate> = estimates.iter().collect();
    sorted.sort_by_key(|e| (e.year, e.month, e.id));

    let mut output = format!(
        "{:>7} {:8} {:16} {:>12}\n",
        "ID", "Month", "Category", "Estimated"
    );
    output.push_str(&"-".repeat(46));
    output.push('\n');

    for estimate in sorted {
        output.push_str(&format!(
            "{:>7} {:04}-{:02}  {:16} {:>12}\n",
            estimate.id.to_string(),
            estimate.year,
            estimate.month,
            truncate(display_name(&estimate.category), 16),
            settings.format_money(estimate.amount)
        ));
    }

    output
}
