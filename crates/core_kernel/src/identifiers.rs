//! Strongly-typed identifiers for domain entities
//!
//! Entities are numbered sequentially by the store, so each identifier is a
//! newtype over `i64`. The wrappers keep a room id from being passed where a
//! tenant id is expected. On the wire they serialize as plain integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $prefix:literal, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its numeric value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the numeric value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }

            /// Returns the human-readable entity name
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let digits = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(digits.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(BuildingId, "BLD", "Building");
define_id!(RoomId, "RM", "Room");
define_id!(TenantId, "TNT", "Tenant");
define_id!(LeaseId, "LSE", "Lease");
define_id!(BillId, "BIL", "Bill");
