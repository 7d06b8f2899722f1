//! Metering and billing engine
//!
//! Turns a lease's rent and two snapshots of a room's meters into a bill.
//! The engine is the only place that moves a room's last readings forward
//! as part of billing.

use chrono::NaiveDate;
use tracing::{debug, info};

use core_kernel::{BillId, BillingPeriod, LeaseId, Money};
use domain_property::{MeterReadings, Room};
use crate::bill::{Bill, BillCharges};
use crate::error::BillingError;
use crate::metering::{MeterKind, Usage, UtilityRates};

/// What the engine needs to know about a lease
pub trait BillableLease {
    fn lease_id(&self) -> LeaseId;
    fn rent_amount(&self) -> Money;
}

/// Computes and recomputes bills at fixed unit rates
#[derive(Debug, Clone, Copy, Default)]
pub struct BillingEngine {
    rates: UtilityRates,
}

impl BillingEngine {
    pub fn new(rates: UtilityRates) -> Self {
        Self { rates }
    }

    /// Computes a pending bill for one period
    ///
    /// On success the room's last readings become `current`. On failure
    /// neither the room nor anything else is touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReading` if `current` is below `previous` or below
    /// the room's last recorded readings.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_bill<L: BillableLease>(
        &self,
        id: BillId,
        lease: &L,
        room: &mut Room,
        previous: MeterReadings,
        current: MeterReadings,
        period: BillingPeriod,
        due_date: NaiveDate,
    ) -> Result<Bill, BillingError> {
        let usage = Usage::between(&previous, &current)?;
        ensure_not_below_room(room, &current)?;

        let charges = self.price(lease.rent_amount(), &usage)?;
        debug!(
            bill_id = %id,
            water_usage = %usage.water,
            elec_usage = %usage.elec,
            total = %charges.total_amount(),
            "Bill computed"
        );

        room.record_readings(current).map_err(|_| regression(room, &current))?;

        let bill = Bill::issue(id, lease.lease_id(), period, due_date, charges, previous, current);
        info!(bill_id = %bill.id, lease_id = %bill.lease_id, period = %bill.period, "Bill issued");
        Ok(bill)
    }

    /// Re-derives a bill's utility fees from new closing readings
    ///
    /// Usage is measured from the bill's own opening readings. Rent and
    /// payment state are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReading` if `current` is below the bill's opening
    /// readings or the room's last recorded readings. The bill and room are
    /// unchanged on error.
    pub fn recompute(
        &self,
        bill: &mut Bill,
        room: &mut Room,
        current: MeterReadings,
    ) -> Result<(), BillingError> {
        let usage = Usage::between(&bill.opening_readings(), &current)?;
        ensure_not_below_room(room, &current)?;

        let charges = self.price(bill.rent_fee(), &usage)?;
        room.record_readings(current).map_err(|_| regression(room, &current))?;
        bill.reprice(charges, current);

        info!(
            bill_id = %bill.id,
            water_fee = %bill.water_fee(),
            elec_fee = %bill.elec_fee(),
            total = %bill.total_amount(),
            "Bill recomputed from meter reading"
        );
        Ok(())
    }

    fn price(&self, rent: Money, usage: &Usage) -> Result<BillCharges, BillingError> {
        let currency = rent.currency();
        BillCharges::new(
            rent,
            usage.water_fee(&self.rates, currency)?,
            usage.elec_fee(&self.rates, currency)?,
        )
    }
}

fn ensure_not_below_room(room: &Room, current: &MeterReadings) -> Result<(), BillingError> {
    Usage::between(&room.last_readings(), current).map(|_| ())
}

fn regression(room: &Room, current: &MeterReadings) -> BillingError {
    let last = room.last_readings();
    if current.water < last.water {
        BillingError::InvalidReading {
            meter: MeterKind::Water,
            previous: last.water,
            current: current.water,
        }
    } else {
        BillingError::InvalidReading {
            meter: MeterKind::Electricity,
            previous: last.elec,
            current: current.elec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{BuildingId, Currency, RoomId};
    use rust_decimal_macros::dec;

    struct FixedRent(Money);

    impl BillableLease for FixedRent {
        fn lease_id(&self) -> LeaseId {
            LeaseId::new(7)
        }

        fn rent_amount(&self) -> Money {
            self.0
        }
    }

    fn room_at(water: rust_decimal::Decimal, elec: rust_decimal::Decimal) -> Room {
        Room::new(
            RoomId::new(5),
            BuildingId::new(1),
            "A-102",
            dec!(30),
            MeterReadings::new(water, elec),
        )
        .unwrap()
    }

    fn engine() -> BillingEngine {
        BillingEngine::new(UtilityRates::new(dec!(5), dec!(1.2)).unwrap())
    }

    fn january() -> (BillingPeriod, NaiveDate) {
        (
            BillingPeriod::new(2024, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_compute_bill_prices_usage() {
        let mut room = room_at(dec!(100), dec!(400));
        let lease = FixedRent(Money::new(dec!(3000), Currency::CNY));
        let (period, due) = january();

        let bill = engine()
            .compute_bill(
                BillId::new(1),
                &lease,
                &mut room,
                MeterReadings::new(dec!(100), dec!(400)),
                MeterReadings::new(dec!(120), dec!(450)),
                period,
                due,
            )
            .unwrap();

        assert_eq!(bill.rent_fee().amount(), dec!(3000));
        assert_eq!(bill.water_fee().amount(), dec!(100.00));
        assert_eq!(bill.elec_fee().amount(), dec!(60.00));
        assert_eq!(bill.total_amount().amount(), dec!(3160.00));
        assert_eq!(bill.lease_id, LeaseId::new(7));
        assert_eq!(room.last_readings(), MeterReadings::new(dec!(120), dec!(450)));
    }

    #[test]
    fn test_compute_bill_rejects_reading_below_room() {
        let mut room = room_at(dec!(130), dec!(400));
        let lease = FixedRent(Money::new(dec!(3000), Currency::CNY));
        let (period, due) = january();

        let err = engine()
            .compute_bill(
                BillId::new(1),
                &lease,
                &mut room,
                MeterReadings::new(dec!(100), dec!(400)),
                MeterReadings::new(dec!(120), dec!(450)),
                period,
                due,
            )
            .unwrap_err();

        assert!(matches!(err, BillingError::InvalidReading { meter: MeterKind::Water, .. }));
        assert_eq!(room.last_readings(), MeterReadings::new(dec!(130), dec!(400)));
    }

    #[test]
    fn test_recompute_keeps_rent_and_moves_room() {
        let mut room = room_at(dec!(100), dec!(400));
        let lease = FixedRent(Money::new(dec!(3000), Currency::CNY));
        let (period, due) = january();
        let engine = engine();
        let mut bill = engine
            .compute_bill(
                BillId::new(1),
                &lease,
                &mut room,
                MeterReadings::new(dec!(100), dec!(400)),
                MeterReadings::new(dec!(100), dec!(400)),
                period,
                due,
            )
            .unwrap();
        assert!(bill.water_fee().is_zero());

        engine
            .recompute(&mut bill, &mut room, MeterReadings::new(dec!(120), dec!(450)))
            .unwrap();

        assert_eq!(bill.rent_fee().amount(), dec!(3000));
        assert_eq!(bill.water_fee().amount(), dec!(100.00));
        assert_eq!(bill.elec_fee().amount(), dec!(60.00));
        assert_eq!(bill.closing_readings(), MeterReadings::new(dec!(120), dec!(450)));
        assert_eq!(room.last_water_reading(), dec!(120));
    }
}
