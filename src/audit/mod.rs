//! Change journal for Tally
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON line with before/after snapshots of the record.
//!
//! - `AuditEntry`: one journal line (timestamp, operation, record, snapshots)
//! - `AuditLogger`: appends entries and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
