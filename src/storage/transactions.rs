//! Transaction repository
//!
//! Stores transactions in transactions.json, indexed by category name.

use std::path::PathBuf;

use crate::error::TallyResult;
use crate::models::{Transaction, TransactionId};

use super::collection::{Collection, Record};

pub(crate) const BY_CATEGORY: &str = "category";

impl Record for Transaction {
    type Id = TransactionId;
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> TransactionId {
        self.id
    }

    fn assign_id(&mut self, id: TransactionId) {
        self.id = id;
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![(BY_CATEGORY, self.category.clone())]
    }
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    records: Collection<Transaction>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            records: Collection::new(path),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.records.is_ready()
    }

    pub fn create_if_missing(&self) -> TallyResult<bool> {
        self.records.create_if_missing()
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> TallyResult<()> {
        self.records.load()
    }

    /// Store a new transaction and return its assigned id
    pub fn add(&self, transaction: Transaction) -> TallyResult<TransactionId> {
        self.records.add(transaction)
    }

    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.records.get(id)
    }

    /// All transactions in id order
    pub fn get_all(&self) -> TallyResult<Vec<Transaction>> {
        self.records.get_all()
    }

    pub fn update(&self, id: TransactionId, transaction: Transaction) -> TallyResult<()> {
        self.records.update(id, transaction)
    }

    /// Delete a transaction; returns whether it existed
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        self.records.delete(id)
    }

    /// Number of transactions filed under a category name
    pub fn count_by_category(&self, category: &str) -> TallyResult<usize> {
        self.records.count_by_index(BY_CATEGORY, category)
    }
}
