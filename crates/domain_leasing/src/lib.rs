//! Leasing Domain
//!
//! A lease binds one tenant to one room for a date range, and owns the
//! bills issued against it.
//!
//! # Lease Status
//!
//! ```text
//! Pending -> Active -> Terminated
//! ```
//!
//! Signing moves a lease straight through Pending to Active, occupies the
//! room and issues the first bill. Termination, explicit or by expiry,
//! vacates the room. A tenant holds at most one active lease.

pub mod lease;
pub mod lifecycle;
pub mod error;

pub use lease::{Lease, LeaseStatus, LeaseTerms, MeterBaseline, Termination, TerminationReason};
pub use lifecycle::LeaseLifecycle;
pub use error::LeaseError;
