//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{Currency, Money};
use domain_billing::UtilityRates;
use domain_property::MeterReadings;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for monthly rents between 100.00 and 99,999.99 CNY
pub fn rent_strategy() -> impl Strategy<Value = Money> {
    (10_000i64..10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::CNY))
}

/// Strategy for a chain of readings that never decrease
pub fn reading_sequence_strategy(len: usize) -> impl Strategy<Value = Vec<MeterReadings>> {
    prop::collection::vec((0i64..100_000i64, 0i64..100_000i64), len).prop_map(|deltas| {
        let mut current = MeterReadings::zero();
        deltas
            .into_iter()
            .map(|(dw, de)| {
                current = MeterReadings::new(
                    current.water + Decimal::new(dw, 2),
                    current.elec + Decimal::new(de, 2),
                );
                current
            })
            .collect()
    })
}

/// Strategy for unit rates with up to four decimals
pub fn rates_strategy() -> impl Strategy<Value = UtilityRates> {
    (0i64..100_000i64, 0i64..100_000i64)
        .prop_map(|(w, e)| UtilityRates { water: Decimal::new(w, 4), elec: Decimal::new(e, 4) })
}

/// Strategy for dates between 2020 and 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for lease terms: a start date and an end date not before it
pub fn lease_term_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..1096i64).prop_map(|(start, days)| (start, start + Duration::days(days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::assert_readings_monotonic;

    proptest! {
        #[test]
        fn test_reading_sequences_are_monotonic(readings in reading_sequence_strategy(12)) {
            assert_readings_monotonic(&readings);
        }

        #[test]
        fn test_lease_terms_are_ordered((start, end) in lease_term_strategy()) {
            prop_assert!(start <= end);
        }
    }
}
