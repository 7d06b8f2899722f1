//! Leases and the bills they own

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BillId, DateRange, LeaseId, Money, RoomId, TenantId};
use domain_billing::{Bill, BillableLease};
use domain_property::{MeterReadings, Room};
use crate::error::LeaseError;

/// Lease status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaseStatus {
    /// Drafted, not yet in force
    Pending,
    /// In force; the room is occupied
    Active,
    /// Ended by expiry or by the landlord
    Terminated,
}

impl LeaseStatus {
    /// Display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            LeaseStatus::Pending => "Pending signature",
            LeaseStatus::Active => "Active",
            LeaseStatus::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LeaseStatus::Pending => "Pending",
            LeaseStatus::Active => "Active",
            LeaseStatus::Terminated => "Terminated",
        };
        f.write_str(tag)
    }
}

/// Why a lease ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The end date passed
    Expired,
    /// The landlord ended it
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub on: NaiveDate,
    pub reason: TerminationReason,
}

/// Where the first bill's utility usage is measured from
///
/// The first bill's closing readings are always the room's readings at
/// signing. The baseline picks the opening readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "readings", rename_all = "snake_case")]
pub enum MeterBaseline {
    /// The room's current readings: the first bill has no usage
    #[default]
    RoomReadings,
    /// Zero: the first bill charges everything on the meters
    Zero,
    /// Readings agreed at signing, no higher than the room's
    Explicit(MeterReadings),
}

impl MeterBaseline {
    /// Opening readings for a first bill on `room`
    pub fn opening_readings(&self, room: &Room) -> MeterReadings {
        match self {
            MeterBaseline::RoomReadings => room.last_readings(),
            MeterBaseline::Zero => MeterReadings::zero(),
            MeterBaseline::Explicit(readings) => *readings,
        }
    }
}

impl FromStr for MeterBaseline {
    type Err = String;

    /// Parses the configurable baselines, `room` and `zero`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "room" | "room_readings" => Ok(MeterBaseline::RoomReadings),
            "zero" => Ok(MeterBaseline::Zero),
            other => Err(format!("unknown meter baseline '{}'", other)),
        }
    }
}

/// What the landlord agrees to when signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTerms {
    pub room_id: RoomId,
    pub tenant_id: TenantId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Money,
    pub deposit: Money,
}

impl LeaseTerms {
    /// Checks the terms and returns the lease term
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the dates are inverted, the rent is not
    /// positive, the deposit is negative or the two differ in currency.
    pub fn validate(&self) -> Result<DateRange, LeaseError> {
        let term = DateRange::new(self.start_date, self.end_date)
            .map_err(|e| LeaseError::validation(e.to_string()))?;
        if !self.rent_amount.is_positive() {
            return Err(LeaseError::validation(format!(
                "rent_amount must be positive, got {}",
                self.rent_amount.amount()
            )));
        }
        if self.deposit.is_negative() {
            return Err(LeaseError::validation(format!(
                "deposit must not be negative, got {}",
                self.deposit.amount()
            )));
        }
        if self.deposit.currency() != self.rent_amount.currency() {
            return Err(LeaseError::validation("rent_amount and deposit must share a currency"));
        }
        Ok(term)
    }
}

/// A rental agreement between one tenant and one room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lease {
    /// Unique identifier
    pub id: LeaseId,
    /// Leased room
    pub room_id: RoomId,
    /// Tenant holding the lease
    pub tenant_id: TenantId,
    /// Inclusive start and end dates
    pub term: DateRange,
    /// Monthly rent
    pub rent_amount: Money,
    /// Security deposit
    pub deposit: Money,
    status: LeaseStatus,
    termination: Option<Termination>,
    bills: Vec<Bill>,
}

impl Lease {
    pub(crate) fn draft(id: LeaseId, terms: &LeaseTerms, term: DateRange) -> Self {
        Self {
            id,
            room_id: terms.room_id,
            tenant_id: terms.tenant_id,
            term,
            rent_amount: terms.rent_amount,
            deposit: terms.deposit,
            status: LeaseStatus::Pending,
            termination: None,
            bills: Vec::new(),
        }
    }

    pub fn status(&self) -> LeaseStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    pub fn start_date(&self) -> NaiveDate {
        self.term.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.term.end
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Bills in the order they were issued
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn bill(&self, id: BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn bill_mut(&mut self, id: BillId) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|b| b.id == id)
    }

    /// The most recently issued bill
    pub fn latest_bill(&self) -> Option<&Bill> {
        self.bills.last()
    }

    pub(crate) fn push_bill(&mut self, bill: Bill) {
        self.bills.push(bill);
    }

    pub(crate) fn transition(&mut self, target: LeaseStatus) -> Result<(), LeaseError> {
        if !self.can_transition_to(target) {
            return Err(LeaseError::InvalidTransition {
                lease_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    pub(crate) fn record_termination(&mut self, termination: Termination) -> Result<(), LeaseError> {
        self.transition(LeaseStatus::Terminated)?;
        self.termination = Some(termination);
        Ok(())
    }

    fn can_transition_to(&self, target: LeaseStatus) -> bool {
        use LeaseStatus::*;
        matches!((self.status, target), (Pending, Active) | (Active, Terminated))
    }
}

impl BillableLease for Lease {
    fn lease_id(&self) -> LeaseId {
        self.id
    }

    fn rent_amount(&self) -> Money {
        self.rent_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms() -> LeaseTerms {
        LeaseTerms {
            room_id: RoomId::new(5),
            tenant_id: TenantId::new(2),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            rent_amount: Money::new(dec!(3000), Currency::CNY),
            deposit: Money::new(dec!(6000), Currency::CNY),
        }
    }

    #[test]
    fn test_validate_terms() {
        assert!(terms().validate().is_ok());

        let same_day = LeaseTerms { end_date: date(2024, 1, 1), ..terms() };
        assert!(same_day.validate().is_ok());

        let inverted = LeaseTerms { end_date: date(2023, 12, 31), ..terms() };
        assert!(matches!(inverted.validate(), Err(LeaseError::Validation(_))));

        let free = LeaseTerms { rent_amount: Money::zero(Currency::CNY), ..terms() };
        assert!(matches!(free.validate(), Err(LeaseError::Validation(_))));

        let refund = LeaseTerms { deposit: Money::new(dec!(-1), Currency::CNY), ..terms() };
        assert!(matches!(refund.validate(), Err(LeaseError::Validation(_))));
    }

    #[test]
    fn test_transitions() {
        let terms = terms();
        let mut lease = Lease::draft(LeaseId::new(1), &terms, terms.validate().unwrap());
        assert_eq!(lease.status(), LeaseStatus::Pending);
        assert!(lease.transition(LeaseStatus::Terminated).is_err());

        lease.transition(LeaseStatus::Active).unwrap();
        lease
            .record_termination(Termination { on: date(2024, 6, 1), reason: TerminationReason::Explicit })
            .unwrap();
        assert_eq!(lease.status(), LeaseStatus::Terminated);

        let err = lease.transition(LeaseStatus::Active).unwrap_err();
        assert!(matches!(err, LeaseError::InvalidTransition { from: LeaseStatus::Terminated, .. }));
    }

    #[test]
    fn test_baseline_parsing() {
        assert_eq!("room".parse::<MeterBaseline>().unwrap(), MeterBaseline::RoomReadings);
        assert_eq!("ZERO".parse::<MeterBaseline>().unwrap(), MeterBaseline::Zero);
        assert!("meter".parse::<MeterBaseline>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(LeaseStatus::Active.label(), "Active");
        assert_eq!(LeaseStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_baseline_json_shape() {
        let json = serde_json::to_value(MeterBaseline::RoomReadings).unwrap();
        assert_eq!(json["kind"], "room_readings");

        let explicit = MeterBaseline::Explicit(MeterReadings::new(dec!(80), dec!(300)));
        let json = serde_json::to_value(explicit).unwrap();
        assert_eq!(json["kind"], "explicit");
        let back: MeterBaseline = serde_json::from_value(json).unwrap();
        assert_eq!(back, explicit);
    }
}
