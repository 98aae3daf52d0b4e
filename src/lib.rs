//! Tally - personal income and expense tracker
//!
//! Records income and expense transactions, monthly spending estimates and
//! user-defined categories in local JSON collections, and derives balance,
//! monthly trend, category breakdown and estimate-versus-actual views.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the `TallyError` type
//! - `models`: transactions, estimates, categories and value types
//! - `storage`: keyed JSON collections with indexes
//! - `services`: validated CRUD over storage
//! - `reports`: aggregations over transactions and estimates
//! - `audit`: append-only change journal
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use tally::config::TallyPaths;
//! use tally::reports::BalanceSummary;
//! use tally::storage::Storage;
//!
//! # fn main() -> tally::error::TallyResult<()> {
//! let storage = Storage::open(TallyPaths::new()?)?;
//! let summary = BalanceSummary::generate(&storage)?;
//! println!("{}", summary.balance);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
