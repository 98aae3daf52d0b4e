//! Spending by category
//!
//! Totals expense transactions per category display name, keeping the order
//! in which categories are first seen.

use std::collections::HashMap;

use crate::error::TallyResult;
use crate::models::{display_name, Money, Transaction};
use crate::storage::Storage;

/// Expense totals per category, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    pub labels: Vec<String>,
    pub amounts: Vec<Money>,
}

impl CategoryTotals {
    /// Build totals from any set of transactions; income is ignored
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut totals = Self::default();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for txn in transactions.iter().filter(|t| t.is_expense()) {
            let label = display_name(&txn.category);
            match positions.get(label) {
                Some(&i) => totals.amounts[i] += txn.amount,
                None => {
                    positions.insert(label.to_string(), totals.labels.len());
                    totals.labels.push(label.to_string());
                    totals.amounts.push(txn.amount);
                }
            }
        }

        totals
    }

    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        Ok(Self::from_transactions(&storage.transactions.get_all()?))
    }

    pub fn total(&self) -> Money {
        self.amounts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Format the totals as a table with each category's share
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let total = self.total();

        output.push_str(&format!("{:<24} {:>14} {:>8}\n", "Category", "Spent", "%"));
        output.push_str(&"-".repeat(48));
        output.push('\n');

        for (label, amount) in self.labels.iter().zip(&self.amounts) {
            let share = if total.is_zero() {
                0.0
            } else {
                amount.cents() as f64 / total.cents() as f64 * 100.0
            };
            output.push_str(&format!(
                "{:<24} {:>14} {:>7.1}%\n",
                label,
                amount.format_with_symbol(currency),
                share
            ));
        }

        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Total",
            total.format_with_symbol(currency)
        ));

        output
    }
}
