//! Overall balance

use crate::error::TallyResult;
use crate::models::{Money, Transaction};
use crate::storage::Storage;

/// Total income, total expense and their difference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

impl BalanceSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expense: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        Ok(Self::from_transactions(&storage.transactions.get_all()?))
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        format!(
            "Income:   {:>14}\nExpenses: {:>14}\nBalance:  {:>14}\n",
            self.total_income.format_with_symbol(currency),
            self.total_expense.format_with_symbol(currency),
            self.balance.format_with_symbol(currency)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, units: i64, date: &str) -> Transaction {
        Transaction::new(
            kind,
            Money::from_units(units),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            "misc",
        )
    }

    #[test]
    fn test_balance_example() {
        let summary = BalanceSummary::from_transactions(&[
            txn(TransactionKind::Income, 1000, "2024-01-01"),
            txn(TransactionKind::Expense, 200, "2024-01-05"),
            txn(TransactionKind::Expense, 50, "2024-02-03"),
        ]);

        assert_eq!(summary.total_income, Money::from_units(1000));
        assert_eq!(summary.total_expense, Money::from_units(250));
        assert_eq!(summary.balance, Money::from_units(750));
    }

    #[test]
    fn test_balance_can_go_negative() {
        let summary = BalanceSummary::from_transactions(&[txn(
            TransactionKind::Expense,
            30,
            "2024-01-05",
        )]);
        assert_eq!(summary.balance, Money::from_units(-30));
        assert!(summary.format_terminal("$").contains("-$30.00"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(BalanceSummary::from_transactions(&[]), BalanceSummary::default());
    }
}
