//! Reports module for Tally
//!
//! Pure aggregations over transactions and estimates. Each report can be
//! built from slices (`from_transactions` / `from_records`) or straight from
//! storage (`generate`), and knows how to print itself.

pub mod balance;
pub mod comparison;
pub mod spending;
pub mod trend;

pub use balance::BalanceSummary;
pub use comparison::{CategoryComparison, CategoryComparisonRow, ComparisonRow, EstimateComparison};
pub use spending::CategoryTotals;
pub use trend::MonthlySeries;

use crate::error::TallyResult;
use crate::models::MonthPeriod;
use crate::storage::Storage;

/// Every derived view, recomputed together after a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub balance: BalanceSummary,
    pub monthly: MonthlySeries,
    pub categories: CategoryTotals,
    pub comparison: EstimateComparison,
    pub current_month: CategoryComparison,
}

impl Overview {
    /// Load all records once and build every view from them
    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        Self::generate_for(storage, MonthPeriod::current())
    }

    /// As `generate`, with an explicit month for the per-category view
    pub fn generate_for(storage: &Storage, month: MonthPeriod) -> TallyResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let estimates = storage.estimates.get_all()?;

        Ok(Self {
            balance: BalanceSummary::from_transactions(&transactions),
            monthly: MonthlySeries::from_transactions(&transactions),
            categories: CategoryTotals::from_transactions(&transactions),
            comparison: EstimateComparison::from_records(&estimates, &transactions),
            current_month: CategoryComparison::for_month(month, &estimates, &transactions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{Money, TransactionKind};
    use crate::services::{EstimateInput, EstimateService, TransactionInput, TransactionService};
    use tempfile::TempDir;

    #[test]
    fn test_overview_reflects_mutations() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(TallyPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let transactions = TransactionService::new(&storage);
        let estimates = EstimateService::new(&storage);
        let january = MonthPeriod::new(2024, 1).unwrap();

        estimates
            .add(EstimateInput::for_period("food", Money::from_units(300), january))
            .unwrap();
        let lunch = transactions
            .add(TransactionInput {
                kind: TransactionKind::Expense,
                amount: Money::from_units(200),
                date: january.first_day(),
                category: "food".into(),
                description: None,
            })
            .unwrap();

        let overview = Overview::generate_for(&storage, january).unwrap();
        assert_eq!(overview.balance.balance, Money::from_units(-200));
        assert_eq!(overview.categories.labels, vec!["Food"]);
        assert_eq!(overview.comparison.actual, vec![Money::from_units(200)]);
        assert_eq!(overview.current_month.rows[0].actual, Money::from_units(200));

        transactions.delete(lunch.id).unwrap();

        let overview = Overview::generate_for(&storage, january).unwrap();
        assert_eq!(overview.balance.balance, Money::zero());
        assert!(overview.categories.is_empty());
        assert!(overview.monthly.is_empty());
        assert_eq!(overview.comparison.actual, vec![Money::zero()]);
    }
}
