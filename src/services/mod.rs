//! Service layer for Tally
//!
//! Business logic on top of the storage layer: validation, duplicate and
//! in-use checks, and audit logging of every mutation.

pub mod category;
pub mod estimate;
pub mod transaction;

pub use category::{CategoryService, CategoryUsage};
pub use estimate::{EstimateInput, EstimateService};
pub use transaction::{TransactionFilter, TransactionInput, TransactionService};
