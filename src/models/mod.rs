//! Core data models for Tally
//!
//! The records kept by the store (transactions, estimates, categories) and the
//! value types they are built from.

pub mod category;
pub mod estimate;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{display_name, Category, CategoryKind, DefaultCategory};
pub use estimate::Estimate;
pub use ids::{CategoryId, EstimateId, RecordKey, TransactionId};
pub use money::Money;
pub use period::MonthPeriod;
pub use transaction::{Transaction, TransactionKind};
