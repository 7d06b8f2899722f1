//! Bills and their payment state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{BillId, BillingPeriod, Currency, LeaseId, Money};
use domain_property::MeterReadings;
use crate::error::BillingError;

/// Status of a bill as seen on a given day
///
/// Never stored. Produced by [`Bill::status_on`] from the payment state and
/// the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    /// Awaiting payment, not yet due
    Pending,
    /// Settled
    Paid,
    /// Awaiting payment past its due date
    Overdue,
}

impl BillStatus {
    /// Display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "Pending payment",
            BillStatus::Paid => "Paid",
            BillStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            BillStatus::Pending => "Pending",
            BillStatus::Paid => "Paid",
            BillStatus::Overdue => "Overdue",
        };
        f.write_str(tag)
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BillStatus::Pending),
            "paid" => Ok(BillStatus::Paid),
            "overdue" => Ok(BillStatus::Overdue),
            other => Err(format!("unknown bill status '{}'", other)),
        }
    }
}

/// What has actually happened to a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    Paid { paid_on: NaiveDate },
}

/// The fee lines of a bill
///
/// The total is only ever computed here, from the rounded fees, so the
/// charges are serialize-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillCharges {
    rent_fee: Money,
    water_fee: Money,
    elec_fee: Money,
    total_amount: Money,
}

impl BillCharges {
    /// Rounds each fee half-up and sums them
    ///
    /// # Errors
    ///
    /// Returns a money error if the fees are not in one currency.
    pub fn new(rent_fee: Money, water_fee: Money, elec_fee: Money) -> Result<Self, BillingError> {
        let rent_fee = rent_fee.round_half_up();
        let water_fee = water_fee.round_half_up();
        let elec_fee = elec_fee.round_half_up();
        let total_amount = rent_fee.checked_add(&water_fee)?.checked_add(&elec_fee)?;

        Ok(Self {
            rent_fee,
            water_fee,
            elec_fee,
            total_amount,
        })
    }

    pub fn rent_fee(&self) -> Money {
        self.rent_fee
    }

    pub fn water_fee(&self) -> Money {
        self.water_fee
    }

    pub fn elec_fee(&self) -> Money {
        self.elec_fee
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn currency(&self) -> Currency {
        self.total_amount.currency()
    }
}

/// One billing period's invoice for a lease
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Lease that owns the bill
    pub lease_id: LeaseId,
    /// Billing month
    pub period: BillingPeriod,
    /// Last day to pay before the bill is overdue
    pub due_date: NaiveDate,
    charges: BillCharges,
    opening_readings: MeterReadings,
    closing_readings: MeterReadings,
    payment: PaymentState,
}

impl Bill {
    pub(crate) fn issue(
        id: BillId,
        lease_id: LeaseId,
        period: BillingPeriod,
        due_date: NaiveDate,
        charges: BillCharges,
        opening_readings: MeterReadings,
        closing_readings: MeterReadings,
    ) -> Self {
        Self {
            id,
            lease_id,
            period,
            due_date,
            charges,
            opening_readings,
            closing_readings,
            payment: PaymentState::Unpaid,
        }
    }

    /// Projects the bill's status onto `today`
    pub fn status_on(&self, today: NaiveDate) -> BillStatus {
        match self.payment {
            PaymentState::Paid { .. } => BillStatus::Paid,
            PaymentState::Unpaid if today > self.due_date => BillStatus::Overdue,
            PaymentState::Unpaid => BillStatus::Pending,
        }
    }

    /// Days past the due date, zero unless overdue on `today`
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.status_on(today) {
            BillStatus::Overdue => (today - self.due_date).num_days(),
            _ => 0,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.payment, PaymentState::Paid { .. })
    }

    pub fn paid_on(&self) -> Option<NaiveDate> {
        match self.payment {
            PaymentState::Paid { paid_on } => Some(paid_on),
            PaymentState::Unpaid => None,
        }
    }

    pub fn rent_fee(&self) -> Money {
        self.charges.rent_fee()
    }

    pub fn water_fee(&self) -> Money {
        self.charges.water_fee()
    }

    pub fn elec_fee(&self) -> Money {
        self.charges.elec_fee()
    }

    pub fn total_amount(&self) -> Money {
        self.charges.total_amount()
    }

    /// Readings the utility fees are measured from
    pub fn opening_readings(&self) -> MeterReadings {
        self.opening_readings
    }

    /// Readings the utility fees are measured to
    pub fn closing_readings(&self) -> MeterReadings {
        self.closing_readings
    }

    pub(crate) fn reprice(&mut self, charges: BillCharges, closing_readings: MeterReadings) {
        self.charges = charges;
        self.closing_readings = closing_readings;
    }

    pub(crate) fn mark_paid(&mut self, paid_on: NaiveDate) {
        self.payment = PaymentState::Paid { paid_on };
    }
}
