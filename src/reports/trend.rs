//! Monthly income/expense trend
//!
//! Groups transactions by calendar month and emits parallel series ready for
//! a line or bar chart.

use std::collections::BTreeMap;

use crate::error::TallyResult;
use crate::models::{Money, MonthPeriod, Transaction, TransactionKind};
use crate::storage::Storage;

/// Income and expense totals per month, oldest month first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    pub periods: Vec<MonthPeriod>,
    /// "Jan 2024" style labels, parallel to `periods`
    pub labels: Vec<String>,
    pub incomes: Vec<Money>,
    pub expenses: Vec<Money>,
}

impl MonthlySeries {
    /// Build the series from any set of transactions
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut by_month: BTreeMap<MonthPeriod, (Money, Money)> = BTreeMap::new();

        for txn in transactions {
            let totals = by_month.entry(txn.period()).or_default();
            match txn.kind {
                TransactionKind::Income => totals.0 += txn.amount,
                TransactionKind::Expense => totals.1 += txn.amount,
            }
        }

        let mut series = Self::default();
        for (period, (income, expense)) in by_month {
            series.periods.push(period);
            series.labels.push(period.label());
            series.incomes.push(income);
            series.expenses.push(expense);
        }
        series
    }

    /// Build the series from every stored transaction
    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        Ok(Self::from_transactions(&storage.transactions.get_all()?))
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Format the series as a table
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(55));
        output.push('\n');

        for i in 0..self.len() {
            let net = self.incomes[i] - self.expenses[i];
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                self.labels[i],
                self.incomes[i].format_with_symbol(currency),
                self.expenses[i].format_with_symbol(currency),
                net.format_with_symbol(currency)
            ));
        }

        if self.is_empty() {
            output.push_str("No transactions recorded.\n");
        }

        output
    }
}
