//! Bill lifecycle
//!
//! Payment and late meter readings. Overdue is never set here; it is read
//! off the due date by [`Bill::status_on`].

use chrono::NaiveDate;
use tracing::info;

use domain_property::{MeterReadings, Room};
use crate::bill::Bill;
use crate::engine::BillingEngine;
use crate::error::BillingError;

/// Governs what may happen to an issued bill
#[derive(Debug, Clone, Copy, Default)]
pub struct BillLifecycle {
    engine: BillingEngine,
}

impl BillLifecycle {
    pub fn new(engine: BillingEngine) -> Self {
        Self { engine }
    }

    /// Settles a bill, overdue or not
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPaid` if the bill was settled before.
    pub fn pay(&self, bill: &mut Bill, today: NaiveDate) -> Result<(), BillingError> {
        if bill.is_paid() {
            return Err(BillingError::AlreadyPaid(bill.id));
        }
        let was = bill.status_on(today);
        bill.mark_paid(today);
        info!(bill_id = %bill.id, was = %was, paid_on = %today, "Bill paid");
        Ok(())
    }

    /// Records closing meter readings on an unpaid bill and reprices it
    ///
    /// # Errors
    ///
    /// Returns `BillClosed` if the bill is paid, or `InvalidReading` if a
    /// meter would go backwards. Nothing changes on error.
    pub fn add_meter_reading(
        &self,
        bill: &mut Bill,
        room: &mut Room,
        current: MeterReadings,
    ) -> Result<(), BillingError> {
        if bill.is_paid() {
            return Err(BillingError::BillClosed(bill.id));
        }
        self.engine.recompute(bill, room, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{BillId, BillingPeriod, BuildingId, Currency, LeaseId, Money, RoomId};
    use crate::bill::BillStatus;
    use crate::engine::BillableLease;
    use crate::metering::UtilityRates;
    use rust_decimal_macros::dec;

    struct Rent;

    impl BillableLease for Rent {
        fn lease_id(&self) -> LeaseId {
            LeaseId::new(1)
        }

        fn rent_amount(&self) -> Money {
            Money::new(dec!(3000), Currency::CNY)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (BillLifecycle, Bill, Room) {
        let engine = BillingEngine::new(UtilityRates::new(dec!(5), dec!(1.2)).unwrap());
        let mut room = Room::new(
            RoomId::new(5),
            BuildingId::new(1),
            "A-102",
            dec!(30),
            MeterReadings::new(dec!(100), dec!(400)),
        )
        .unwrap();
        let readings = room.last_readings();
        let bill = engine
            .compute_bill(
                BillId::new(1),
                &Rent,
                &mut room,
                readings,
                readings,
                BillingPeriod::new(2024, 1).unwrap(),
                date(2024, 1, 15),
            )
            .unwrap();
        (BillLifecycle::new(engine), bill, room)
    }

    #[test]
    fn test_pay_overdue_bill() {
        let (lifecycle, mut bill, _) = setup();
        assert_eq!(bill.status_on(date(2024, 2, 1)), BillStatus::Overdue);

        lifecycle.pay(&mut bill, date(2024, 2, 1)).unwrap();
        assert_eq!(bill.status_on(date(2024, 2, 1)), BillStatus::Paid);
        assert_eq!(bill.status_on(date(2030, 1, 1)), BillStatus::Paid);
    }

    #[test]
    fn test_pay_twice_fails() {
        let (lifecycle, mut bill, _) = setup();
        lifecycle.pay(&mut bill, date(2024, 1, 10)).unwrap();
        let err = lifecycle.pay(&mut bill, date(2024, 1, 11)).unwrap_err();
        assert_eq!(err, BillingError::AlreadyPaid(BillId::new(1)));
        assert_eq!(bill.paid_on(), Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_reading_on_paid_bill_is_closed() {
        let (lifecycle, mut bill, mut room) = setup();
        lifecycle.pay(&mut bill, date(2024, 1, 10)).unwrap();
        let err = lifecycle
            .add_meter_reading(&mut bill, &mut room, MeterReadings::new(dec!(120), dec!(450)))
            .unwrap_err();
        assert_eq!(err, BillingError::BillClosed(BillId::new(1)));
        assert_eq!(room.last_water_reading(), dec!(100));
    }

    #[test]
    fn test_reading_keeps_overdue_status() {
        let (lifecycle, mut bill, mut room) = setup();
        lifecycle
            .add_meter_reading(&mut bill, &mut room, MeterReadings::new(dec!(120), dec!(450)))
            .unwrap();
        assert_eq!(bill.status_on(date(2024, 2, 1)), BillStatus::Overdue);
        assert_eq!(bill.water_fee().amount(), dec!(100.00));
    }
}
