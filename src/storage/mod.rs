//! Storage layer for Tally
//!
//! Three keyed collections (transactions, estimates, categories), each a JSON
//! file written atomically, plus the audit log. Nothing can be read or
//! written until [`Storage::initialize`] has run.

pub mod categories;
pub mod collection;
pub mod estimates;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use categories::{seed_defaults, CategoryRepository};
pub use collection::{Collection, Record};
pub use estimates::EstimateRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, Initialization};
pub use transactions::TransactionRepository;

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::error::TallyResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    pub estimates: EstimateRepository,
    pub categories: CategoryRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Bind repositories to their files without touching the disk
    pub fn new(paths: TallyPaths) -> Self {
        Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            estimates: EstimateRepository::new(paths.estimates_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        }
    }

    /// Create and initialize in one step
    pub fn open(paths: TallyPaths) -> TallyResult<Self> {
        let storage = Self::new(paths);
        storage.initialize()?;
        Ok(storage)
    }

    /// Turn the audit log on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
        self
    }

    /// Create files, load collections and seed defaults
    pub fn initialize(&self) -> TallyResult<Initialization> {
        initialize_storage(self)
    }

    /// Whether every collection has been loaded
    pub fn is_ready(&self) -> bool {
        self.transactions.is_ready() && self.estimates.is_ready() && self.categories.is_ready()
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(|| AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        self.write_audit(|| AuditEntry::update(entity_type, entity_id, entity_name, before, after))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(|| AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Append to the change journal
    ///
    /// The collection write has already landed by the time this runs, so a
    /// journal failure is reported as a warning instead of failing the call.
    fn write_audit(&self, entry: impl FnOnce() -> AuditEntry) {
        let Some(logger) = &self.audit else {
            return;
        };
        let entry = entry();
        if let Err(e) = logger.log(&entry) {
            warn!(
                error = %e,
                operation = %entry.operation,
                entity = %entry.entity_id,
                "failed to write audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use crate::models::{Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_new_does_no_io() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TallyPaths::with_base_dir(temp_dir.path().join("base")));

        assert!(!temp_dir.path().join("base").exists());
        assert!(!storage.is_ready());
        assert!(matches!(
            storage.transactions.get_all(),
            Err(TallyError::StorageNotReady)
        ));
    }

    #[test]
    fn test_open_prepares_everything() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(TallyPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        assert!(storage.is_ready());
        assert!(temp_dir.path().join("data").join("categories.json").exists());
        assert!(temp_dir.path().join("data").join("transactions.json").exists());
        assert!(temp_dir.path().join("data").join("estimates.json").exists());
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(TallyPaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap()
            .with_audit(false);

        let txn = Transaction::new(
            TransactionKind::Income,
            Money::from_units(10),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "salary",
        );
        storage.log_create(EntityType::Transaction, "txn-1", None, &txn);

        assert!(storage.audit().is_none());
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_audit_writes_when_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(TallyPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        storage.log_delete(EntityType::Category, "cat-1", Some("Food".into()), &"Food");

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
    }
}
