//! Strongly-typed ID wrappers for all record kinds
//!
//! Identifiers are assigned by the store from a per-collection counter that
//! only moves forward, so an id is never handed out twice. Newtypes keep a
//! transaction id from being passed where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Conversion between a typed id and the raw counter value used by the store
pub trait RecordKey: Copy + Eq + Ord + std::hash::Hash + fmt::Display {
    /// Wrap a raw counter value
    fn from_raw(raw: u64) -> Self;

    /// The raw counter value
    fn raw(&self) -> u64;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Placeholder carried by records that have not been stored yet
            pub const UNASSIGNED: Self = Self(0);

            /// Create an ID from a raw value
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl RecordKey for $name {
            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(EstimateId, "est-");
define_id!(CategoryId, "cat-");
