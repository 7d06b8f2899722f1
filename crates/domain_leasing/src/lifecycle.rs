//! Lease lifecycle manager
//!
//! Signing, termination, expiry and monthly bill issuance. Every operation
//! checks all of its preconditions before touching the lease or the room,
//! so a failed call leaves both as they were.

use chrono::NaiveDate;
use tracing::{debug, info};

use core_kernel::{BillId, LeaseId};
use domain_billing::{Bill, BillingEngine, BillingError, DueDatePolicy};
use domain_property::{MeterReadings, Room};
use crate::error::LeaseError;
use crate::lease::{Lease, LeaseStatus, LeaseTerms, MeterBaseline, Termination, TerminationReason};

/// Drives leases through their lifecycle
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaseLifecycle {
    engine: BillingEngine,
    due_policy: DueDatePolicy,
}

impl LeaseLifecycle {
    pub fn new(engine: BillingEngine, due_policy: DueDatePolicy) -> Self {
        Self { engine, due_policy }
    }

    pub fn engine(&self) -> &BillingEngine {
        &self.engine
    }

    /// Signs a lease against a vacant room
    ///
    /// The lease comes back Active holding its first bill, and the room is
    /// Occupied. `tenant_active_lease` is the tenant's current active lease,
    /// if any.
    ///
    /// # Errors
    ///
    /// - `Validation` if the terms are inconsistent, name another room, or
    ///   carry a negative explicit baseline
    /// - `RoomUnavailable` if the room is not vacant
    /// - `DuplicateActiveLease` if the tenant already has an active lease
    /// - `Billing(InvalidReading)` if an explicit baseline is above the
    ///   room's readings
    pub fn sign(
        &self,
        lease_id: LeaseId,
        first_bill_id: BillId,
        terms: &LeaseTerms,
        room: &mut Room,
        tenant_active_lease: Option<LeaseId>,
        baseline: MeterBaseline,
    ) -> Result<Lease, LeaseError> {
        let term = terms.validate()?;
        if let MeterBaseline::Explicit(readings) = baseline {
            if !readings.dominates(&MeterReadings::zero()) {
                return Err(LeaseError::validation("baseline readings must not be negative"));
            }
        }
        if room.id != terms.room_id {
            return Err(LeaseError::validation(format!(
                "terms are for room {} but room {} was supplied",
                terms.room_id, room.id
            )));
        }
        if !room.is_vacant() {
            return Err(LeaseError::RoomUnavailable {
                room_id: room.id,
                status: room.status(),
            });
        }
        if let Some(existing) = tenant_active_lease {
            return Err(LeaseError::DuplicateActiveLease {
                tenant_id: terms.tenant_id,
                lease_id: existing,
            });
        }

        let (period, due_date) = self
            .due_policy
            .first_bill(term.start)
            .map_err(BillingError::from)?;
        let mut lease = Lease::draft(lease_id, terms, term);
        let opening = baseline.opening_readings(room);
        let closing = room.last_readings();
        let bill = self
            .engine
            .compute_bill(first_bill_id, &lease, room, opening, closing, period, due_date)?;

        room.occupy()?;
        lease.transition(LeaseStatus::Active)?;
        lease.push_bill(bill);

        info!(
            lease_id = %lease.id,
            room_id = %lease.room_id,
            tenant_id = %lease.tenant_id,
            start = %lease.start_date(),
            end = %lease.end_date(),
            "Lease signed"
        );
        Ok(lease)
    }

    /// Ends an active lease at the landlord's request
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the lease is Active.
    pub fn terminate(&self, lease: &mut Lease, room: &mut Room, on: NaiveDate) -> Result<(), LeaseError> {
        self.end(lease, room, Termination { on, reason: TerminationReason::Explicit })
    }

    /// Terminates the lease if its end date is behind `today`
    ///
    /// Returns whether the lease was expired by this call.
    pub fn expire_if_ended(&self, lease: &mut Lease, room: &mut Room, today: NaiveDate) -> Result<bool, LeaseError> {
        if !lease.is_active() || !lease.term.has_ended(today) {
            return Ok(false);
        }
        let on = lease.end_date();
        self.end(lease, room, Termination { on, reason: TerminationReason::Expired })?;
        Ok(true)
    }

    /// Issues the bill for the month after the lease's latest bill
    ///
    /// The new bill carries rent only; usage is added later by meter
    /// reading.
    ///
    /// # Errors
    ///
    /// - `LeaseNotActive` unless the lease is Active
    /// - `PeriodOutsideTerm` if the next period starts after the end date
    pub fn issue_next_bill<'a>(
        &self,
        lease: &'a mut Lease,
        room: &mut Room,
        bill_id: BillId,
    ) -> Result<&'a Bill, LeaseError> {
        if !lease.is_active() {
            return Err(LeaseError::LeaseNotActive {
                lease_id: lease.id,
                status: lease.status(),
            });
        }
        let period = match lease.latest_bill() {
            Some(latest) => latest.period.next(),
            None => {
                self.due_policy
                    .first_bill(lease.start_date())
                    .map_err(BillingError::from)?
                    .0
            }
        };
        if period.first_day() > lease.end_date() {
            return Err(LeaseError::PeriodOutsideTerm {
                lease_id: lease.id,
                period,
                end_date: lease.end_date(),
            });
        }
        let due_date = self.due_policy.due_date(period).map_err(BillingError::from)?;
        let readings = room.last_readings();
        let bill = self
            .engine
            .compute_bill(bill_id, &*lease, room, readings, readings, period, due_date)?;
        debug!(lease_id = %lease.id, period = %period, "Next bill issued");
        lease.push_bill(bill);

        lease.latest_bill().ok_or_else(|| LeaseError::validation("bill was not recorded"))
    }

    fn end(&self, lease: &mut Lease, room: &mut Room, termination: Termination) -> Result<(), LeaseError> {
        if lease.status() != LeaseStatus::Active {
            return Err(LeaseError::InvalidTransition {
                lease_id: lease.id,
                from: lease.status(),
                to: LeaseStatus::Terminated,
            });
        }
        if room.id != lease.room_id {
            return Err(LeaseError::validation(format!(
                "lease {} is for room {}, not {}",
                lease.id, lease.room_id, room.id
            )));
        }
        room.vacate()?;
        lease.record_termination(termination)?;
        info!(
            lease_id = %lease.id,
            room_id = %room.id,
            reason = ?termination.reason,
            on = %termination.on,
            "Lease terminated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{BuildingId, Currency, Money, RoomId, TenantId};
    use domain_property::{MeterReadings, RoomStatus};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room() -> Room {
        Room::new(
            RoomId::new(5),
            BuildingId::new(1),
            "A-102",
            dec!(30),
            MeterReadings::new(dec!(100), dec!(400)),
        )
        .unwrap()
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

    fn signed(room: &mut Room) -> Lease {
        LeaseLifecycle::default()
            .sign(LeaseId::new(1), BillId::new(1), &terms(), room, None, MeterBaseline::RoomReadings)
            .unwrap()
    }

    #[test]
    fn test_sign_activates_and_occupies() {
        let mut room = room();
        let lease = signed(&mut room);
        assert_eq!(lease.status(), LeaseStatus::Active);
        assert_eq!(room.status(), RoomStatus::Occupied);
        assert_eq!(lease.bills().len(), 1);

        let bill = &lease.bills()[0];
        assert_eq!(bill.period.label(), "2024-01");
        assert_eq!(bill.due_date, date(2024, 1, 15));
        assert!(bill.water_fee().is_zero());
        assert_eq!(bill.total_amount().amount(), dec!(3000));
    }

    #[test]
    fn test_zero_baseline_charges_whole_meter() {
        let mut room = room();
        let lease = LeaseLifecycle::default()
            .sign(LeaseId::new(1), BillId::new(1), &terms(), &mut room, None, MeterBaseline::Zero)
            .unwrap();
        let bill = &lease.bills()[0];
        assert_eq!(bill.water_fee().amount(), dec!(500.00));
        assert_eq!(bill.elec_fee().amount(), dec!(400.00));
    }

    #[test]
    fn test_explicit_baseline_above_room_is_rejected() {
        let mut room = room();
        let baseline = MeterBaseline::Explicit(MeterReadings::new(dec!(101), dec!(0)));
        let err = LeaseLifecycle::default()
            .sign(LeaseId::new(1), BillId::new(1), &terms(), &mut room, None, baseline)
            .unwrap_err();
        assert!(matches!(err, LeaseError::Billing(BillingError::InvalidReading { .. })));
        assert!(room.is_vacant());
    }

    #[test]
    fn test_negative_explicit_baseline_is_rejected() {
        let mut room = room();
        let baseline = MeterBaseline::Explicit(MeterReadings::new(dec!(-1), dec!(0)));
        let err = LeaseLifecycle::default()
            .sign(LeaseId::new(1), BillId::new(1), &terms(), &mut room, None, baseline)
            .unwrap_err();
        assert!(matches!(err, LeaseError::Validation(_)));
        assert!(room.is_vacant());
    }

    #[test]
    fn test_sign_rejects_occupied_room() {
        let mut room = room();
        signed(&mut room);
        let before = room.clone();
        let err = LeaseLifecycle::default()
            .sign(LeaseId::new(2), BillId::new(2), &terms(), &mut room, None, MeterBaseline::RoomReadings)
            .unwrap_err();
        assert_eq!(
            err,
            LeaseError::RoomUnavailable { room_id: RoomId::new(5), status: RoomStatus::Occupied }
        );
        assert_eq!(room, before);
    }

    #[test]
    fn test_sign_rejects_second_active_lease() {
        let mut room = room();
        let err = LeaseLifecycle::default()
            .sign(
                LeaseId::new(2),
                BillId::new(2),
                &terms(),
                &mut room,
                Some(LeaseId::new(1)),
                MeterBaseline::RoomReadings,
            )
            .unwrap_err();
        assert!(matches!(err, LeaseError::DuplicateActiveLease { .. }));
        assert!(room.is_vacant());
    }

    #[test]
    fn test_terminate_vacates_room() {
        let mut room = room();
        let mut lease = signed(&mut room);
        let lifecycle = LeaseLifecycle::default();

        lifecycle.terminate(&mut lease, &mut room, date(2024, 6, 30)).unwrap();
        assert_eq!(lease.status(), LeaseStatus::Terminated);
        assert!(room.is_vacant());
        assert_eq!(lease.termination().unwrap().reason, TerminationReason::Explicit);

        let err = lifecycle.terminate(&mut lease, &mut room, date(2024, 7, 1)).unwrap_err();
        assert!(matches!(err, LeaseError::InvalidTransition { .. }));
    }

    #[test]
    fn test_expiry_only_after_end_date() {
        let mut room = room();
        let mut lease = signed(&mut room);
        let lifecycle = LeaseLifecycle::default();

        assert!(!lifecycle.expire_if_ended(&mut lease, &mut room, date(2024, 12, 31)).unwrap());
        assert!(lease.is_active());

        assert!(lifecycle.expire_if_ended(&mut lease, &mut room, date(2025, 1, 1)).unwrap());
        let termination = lease.termination().unwrap();
        assert_eq!(termination.reason, TerminationReason::Expired);
        assert_eq!(termination.on, date(2024, 12, 31));
        assert!(room.is_vacant());
    }

    #[test]
    fn test_issue_bills_until_end_of_term() {
        let mut room = room();
        let mut lease = signed(&mut room);
        let lifecycle = LeaseLifecycle::default();

        for n in 2..=12 {
            let bill = lifecycle.issue_next_bill(&mut lease, &mut room, BillId::new(n)).unwrap();
            assert_eq!(bill.period.month(), n as u32);
            assert_eq!(bill.due_date, date(2024, n as u32, 15));
        }

        let err = lifecycle.issue_next_bill(&mut lease, &mut room, BillId::new(13)).unwrap_err();
        assert!(matches!(err, LeaseError::PeriodOutsideTerm { .. }));
        assert_eq!(lease.bills().len(), 12);
    }
}
