//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use domain_billing::{Bill, BillStatus};
use domain_property::{MeterReadings, Room, RoomStatus};

/// Asserts that a bill's total is exactly the sum of its three fees
pub fn assert_total_is_sum(bill: &Bill) {
    let sum = bill.rent_fee().amount() + bill.water_fee().amount() + bill.elec_fee().amount();
    assert_eq!(
        bill.total_amount().amount(),
        sum,
        "Bill {} total {} does not equal rent {} + water {} + elec {}",
        bill.id,
        bill.total_amount().amount(),
        bill.rent_fee().amount(),
        bill.water_fee().amount(),
        bill.elec_fee().amount()
    );
}

/// Asserts the status a bill shows on a given day
pub fn assert_bill_status(bill: &Bill, today: NaiveDate, expected: BillStatus) {
    let actual = bill.status_on(today);
    assert_eq!(
        actual, expected,
        "Bill {} (due {}) shows {} on {}, expected {}",
        bill.id, bill.due_date, actual, today, expected
    );
}

/// Asserts that a sequence of readings never goes backwards on either meter
pub fn assert_readings_monotonic(readings: &[MeterReadings]) {
    for (i, pair) in readings.windows(2).enumerate() {
        assert!(
            pair[1].dominates(&pair[0]),
            "Readings regress at index {}: {:?} -> {:?}",
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

pub fn assert_room_status(room: &Room, expected: RoomStatus) {
    assert_eq!(
        room.status(),
        expected,
        "Room {} is {:?}, expected {:?}",
        room.room_number,
        room.status(),
        expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ReadingFixtures;

    #[test]
    fn test_monotonic_readings_pass() {
        assert_readings_monotonic(&[
            MeterReadings::zero(),
            ReadingFixtures::at_signing(),
            ReadingFixtures::one_month_later(),
        ]);
    }

    #[test]
    #[should_panic(expected = "Readings regress")]
    fn test_regressing_readings_fail() {
        assert_readings_monotonic(&[ReadingFixtures::at_signing(), ReadingFixtures::water_regressed()]);
    }
}
