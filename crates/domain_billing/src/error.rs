//! Billing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{BillId, MoneyError, TemporalError};
use crate::metering::MeterKind;

/// Errors that can occur in the billing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// A meter reading went backwards
    #[error("Invalid {meter} reading: current {current} is below previous {previous}")]
    InvalidReading {
        meter: MeterKind,
        previous: Decimal,
        current: Decimal,
    },

    /// Payment attempted on a bill that is already settled
    #[error("Bill {0} is already paid")]
    AlreadyPaid(BillId),

    /// Meter reading submitted for a settled bill
    #[error("Bill {0} is closed; readings can only be added to unpaid bills")]
    BillClosed(BillId),

    /// Meter reading submitted for a bill that a later bill already builds on
    #[error("Bill {bill_id} has been superseded by bill {later}; submit readings on the latest bill")]
    Superseded {
        bill_id: BillId,
        later: BillId,
    },

    /// Unit rate is negative
    #[error("Invalid {meter} rate: {rate}")]
    InvalidRate {
        meter: MeterKind,
        rate: Decimal,
    },

    /// Usage times rate does not fit a decimal
    #[error("{meter} charge overflows: usage {usage} at rate {rate}")]
    AmountOverflow {
        meter: MeterKind,
        usage: Decimal,
        rate: Decimal,
    },

    /// Money arithmetic failed
    #[error("Calculation error: {0}")]
    Money(#[from] MoneyError),

    /// Calendar computation failed
    #[error("Schedule error: {0}")]
    Schedule(#[from] TemporalError),
}
