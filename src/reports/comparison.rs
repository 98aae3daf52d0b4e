//! Estimated versus actual spending

use std::collections::{BTreeMap, HashMap};

use crate::error::TallyResult;
use crate::models::{Estimate, Money, MonthPeriod, Transaction};
use crate::storage::Storage;

/// Estimated and actual expense totals per month, oldest month first
///
/// Months come from either side; a month with only estimates has zero
/// actual spending and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateComparison {
    pub periods: Vec<MonthPeriod>,
    pub labels: Vec<String>,
    pub estimated: Vec<Money>,
    pub actual: Vec<Money>,
}

/// One month of an [`EstimateComparison`]
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow<'a> {
    pub label: &'a str,
    pub estimated: Money,
    pub actual: Money,
}

impl ComparisonRow<'_> {
    /// Positive when spending stayed under the estimate
    pub fn remaining(&self) -> Money {
        self.estimated - self.actual
    }
}

impl EstimateComparison {
    pub fn from_records(estimates: &[Estimate], transactions: &[Transaction]) -> Self {
        let mut by_month: BTreeMap<MonthPeriod, (Money, Money)> = BTreeMap::new();

        // Stored estimates always carry a valid month; anything else is skipped
        for (estimate, period) in estimates
            .iter()
            .filter_map(|e| e.period().ok().map(|p| (e, p)))
        {
            by_month.entry(period).or_default().0 += estimate.amount;
        }

        for txn in transactions.iter().filter(|t| t.is_expense()) {
            by_month.entry(txn.period()).or_default().1 += txn.amount;
        }

        let mut comparison = Self::default();
        for (period, (estimated, actual)) in by_month {
            comparison.periods.push(period);
            comparison.labels.push(period.label());
            comparison.estimated.push(estimated);
            comparison.actual.push(actual);
        }
        comparison
    }

    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        Ok(Self::from_records(
            &storage.estimates.get_all()?,
            &storage.transactions.get_all()?,
        ))
    }

    pub fn rows(&self) -> impl Iterator<Item = ComparisonRow<'_>> {
        self.labels
            .iter()
            .zip(&self.estimated)
            .zip(&self.actual)
            .map(|((label, &estimated), &actual)| ComparisonRow {
                label,
                estimated,
                actual,
            })
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        format_rows("Month", self.rows(), currency)
    }
}

/// Estimated versus actual spending per category within one month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub period: MonthPeriod,
    pub rows: Vec<CategoryComparisonRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparisonRow {
    pub category: String,
    pub estimated: Money,
    pub actual: Money,
}

impl CategoryComparison {
    /// Compare one month's estimates with that month's expenses
    ///
    /// Categories appear in the order their estimates were found, followed
    /// by categories with spending but no estimate.
    pub fn for_month(
        period: MonthPeriod,
        estimates: &[Estimate],
        transactions: &[Transaction],
    ) -> Self {
        let mut rows: Vec<CategoryComparisonRow> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let mut row_for = |category: &str, rows: &mut Vec<CategoryComparisonRow>| -> usize {
            *positions.entry(category.to_string()).or_insert_with(|| {
                rows.push(CategoryComparisonRow {
                    category: category.to_string(),
                    estimated: Money::zero(),
                    actual: Money::zero(),
                });
                rows.len() - 1
            })
        };

        for estimate in estimates.iter().filter(|e| e.is_for(period)) {
            let i = row_for(&estimate.category, &mut rows);
            rows[i].estimated += estimate.amount;
        }

        for txn in transactions
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.date))
        {
            let i = row_for(&txn.category, &mut rows);
            rows[i].actual += txn.amount;
        }

        Self { period, rows }
    }

    pub fn generate(storage: &Storage, period: MonthPeriod) -> TallyResult<Self> {
        Ok(Self::for_month(
            period,
            &storage.estimates.find_by_period(period)?,
            &storage.transactions.get_all()?,
        ))
    }

    pub fn total_estimated(&self) -> Money {
        self.rows.iter().map(|r| r.estimated).sum()
    }

    pub fn total_actual(&self) -> Money {
        self.rows.iter().map(|r| r.actual).sum()
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format!("{}\n\n", self.period.label());
        let rows = self.rows.iter().map(|r| ComparisonRow {
            label: &r.category,
            estimated: r.estimated,
            actual: r.actual,
        });
        output.push_str(&format_rows("Category", rows, currency));

        if !self.rows.is_empty() {
            let total = ComparisonRow {
                label: "Total",
                estimated: self.total_estimated(),
                actual: self.total_actual(),
            };
            output.push_str(&"-".repeat(65));
            output.push('\n');
            output.push_str(&format_row(&total, currency));
        }
        output
    }
}

fn format_rows<'a>(
    heading: &str,
    rows: impl Iterator<Item = ComparisonRow<'a>>,
    currency: &str,
) -> String {
    let mut output = format!(
        "{:<20} {:>14} {:>14} {:>14}\n",
        heading, "Estimated", "Actual", "Remaining"
    );
    output.push_str(&"-".repeat(65));
    output.push('\n');

    let mut any = false;
    for row in rows {
        any = true;
        output.push_str(&format_row(&row, currency));
    }

    if !any {
        output.push_str("Nothing to compare.\n");
    }
    output
}

fn format_row(row: &ComparisonRow<'_>, currency: &str) -> String {
    format!(
        "{:<20} {:>14} {:>14} {:>14}\n",
        row.label,
        row.estimated.format_with_symbol(currency),
        row.actual.format_with_symbol(currency),
        row.remaining().format_with_symbol(currency)
    )
}
