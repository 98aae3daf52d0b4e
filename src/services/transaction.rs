//! Transaction service
//!
//! Validated create/update/delete of income and expense transactions, and
//! filtered listing.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, MonthPeriod, Transaction, TransactionId, TransactionKind};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Exact-match filters applied after loading every transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub month: Option<MonthPeriod>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn month(mut self, month: MonthPeriod) -> Self {
        self.month = Some(month);
        self
    }

    /// Whether a transaction passes every set filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |kind| txn.kind == kind)
            && self
                .category
                .as_deref()
                .map_or(true, |category| txn.category == category)
            && self.month.map_or(true, |month| month.contains(txn.date))
    }
}

/// Fields supplied when creating or replacing a transaction
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
    pub description: Option<String>,
}

impl TransactionInput {
    fn into_transaction(self) -> Transaction {
        let txn = Transaction::new(self.kind, self.amount, self.date, self.category.trim());
        match self.description {
            Some(description) => txn.with_description(description),
            None => txn,
        }
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new transaction
    pub fn add(&self, input: TransactionInput) -> TallyResult<Transaction> {
        let mut txn = input.into_transaction();
        Self::validate(&txn)?;

        txn.id = self
            .storage
            .transactions
            .add(txn.clone())
            .map_err(|e| e.context("Failed to add transaction"))?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(describe(&txn)),
            &txn,
        );
        debug!(id = %txn.id, kind = %txn.kind, amount = txn.amount.cents(), "transaction added");

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Transactions passing `filter`, in id order
    pub fn list(&self, filter: &TransactionFilter) -> TallyResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        transactions.retain(|txn| filter.matches(txn));
        Ok(transactions)
    }

    /// Replace every field of a transaction, keeping its id and creation time
    pub fn update(&self, id: TransactionId, input: TransactionInput) -> TallyResult<Transaction> {
        let before = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

        let mut after = input.into_transaction();
        after.id = id;
        after.created_at = before.created_at;
        after.updated_at = Utc::now();
        Self::validate(&after)?;

        self.storage
            .transactions
            .update(id, after.clone())
            .map_err(|e| e.context("Failed to update transaction"))?;

        self.storage.log_update(
            EntityType::Transaction,
            id.to_string(),
            Some(describe(&after)),
            &before,
            &after,
        );
        debug!(%id, "transaction updated");

        Ok(after)
    }

    /// Delete a transaction; deleting a missing id does nothing
    ///
    /// Returns whether a transaction was removed.
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let Some(txn) = self.storage.transactions.get(id)? else {
            debug!(%id, "delete of missing transaction ignored");
            return Ok(false);
        };

        let removed = self
            .storage
            .transactions
            .delete(id)
            .map_err(|e| e.context("Failed to delete transaction"))?;

        if removed {
            self.storage.log_delete(
                EntityType::Transaction,
                id.to_string(),
                Some(describe(&txn)),
                &txn,
            );
            debug!(%id, "transaction deleted");
        }

        Ok(removed)
    }

    fn validate(txn: &Transaction) -> TallyResult<()> {
        txn.validate().map_err(|e| {
            warn!(error = %e, "invalid transaction rejected");
            TallyError::Validation(e.to_string())
        })
    }
}

fn describe(txn: &Transaction) -> String {
    format!("{} {}", txn.kind, txn.category)
}
