//! Billing Domain - Utility Metering and Bills
//!
//! This crate turns a lease's rent and a room's meter readings into bills,
//! and governs what may happen to a bill afterwards.
//!
//! # Bill Computation
//!
//! ```text
//! rent_fee  = lease rent for the period
//! water_fee = (current water - previous water) x water rate
//! elec_fee  = (current elec  - previous elec)  x elec rate
//! total     = rent_fee + water_fee + elec_fee
//! ```
//!
//! Fees are rounded half-up to the currency's minor unit, so the total is
//! always the exact sum of the three fees shown on the bill.
//!
//! # Bill Status
//!
//! ```text
//! Pending -> Paid
//! Pending -> Overdue -> Paid
//! ```
//!
//! Only "unpaid" and "paid" are stored. Overdue is projected at read time
//! from the due date, so it can never drift from it.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingEngine, UtilityRates};
//!
//! let engine = BillingEngine::new(UtilityRates::default());
//! let bill = engine.compute_bill(bill_id, &lease, &mut room, previous, current, period, due_date)?;
//! assert_eq!(bill.total_amount(), bill.rent_fee() + bill.water_fee() + bill.elec_fee());
//! ```

pub mod bill;
pub mod metering;
pub mod engine;
pub mod lifecycle;
pub mod schedule;
pub mod error;

pub use bill::{Bill, BillCharges, BillStatus, PaymentState};
pub use metering::{MeterKind, UtilityRates, Usage};
pub use engine::{BillableLease, BillingEngine};
pub use lifecycle::BillLifecycle;
pub use schedule::DueDatePolicy;
pub use error::BillingError;
