//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_billing::UtilityRates;
use domain_property::MeterReadings;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard monthly rent
    pub fn cny_rent() -> Money {
        Money::new(dec!(3000.00), Currency::CNY)
    }

    /// Standard deposit, two months' rent
    pub fn cny_deposit() -> Money {
        Money::new(dec!(6000.00), Currency::CNY)
    }
}

/// Fixture for calendar test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Standard lease start (Jan 1, 2024)
    pub fn lease_start() -> NaiveDate {
        Self::date(2024, 1, 1)
    }

    /// Standard lease end (Dec 31, 2024)
    pub fn lease_end() -> NaiveDate {
        Self::date(2024, 12, 31)
    }

    /// Due date of the first bill of a lease starting on `lease_start`
    pub fn first_due_date() -> NaiveDate {
        Self::date(2024, 1, 15)
    }

    /// The day the first bill becomes overdue
    pub fn day_after_first_due() -> NaiveDate {
        Self::date(2024, 1, 16)
    }
}

/// Fixture for unit rates
pub struct RateFixtures;

impl RateFixtures {
    /// Water 5 per unit, electricity 1.2 per unit
    pub fn standard() -> UtilityRates {
        UtilityRates {
            water: dec!(5),
            elec: dec!(1.2),
        }
    }
}

/// Fixture for meter readings
pub struct ReadingFixtures;

impl ReadingFixtures {
    /// Readings on the room when the lease is signed
    pub fn at_signing() -> MeterReadings {
        MeterReadings::new(dec!(100), dec!(400))
    }

    /// Readings a month later: 20 units of water, 50 of electricity
    pub fn one_month_later() -> MeterReadings {
        MeterReadings::new(dec!(120), dec!(450))
    }

    /// Water meter below `at_signing`
    pub fn water_regressed() -> MeterReadings {
        MeterReadings::new(dec!(90), dec!(450))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_readings_are_ordered() {
        assert!(ReadingFixtures::one_month_later().dominates(&ReadingFixtures::at_signing()));
        assert!(!ReadingFixtures::water_regressed().dominates(&ReadingFixtures::at_signing()));
    }

    #[test]
    fn test_standard_dates() {
        assert!(TemporalFixtures::lease_start() < TemporalFixtures::first_due_date());
        assert!(TemporalFixtures::first_due_date() < TemporalFixtures::day_after_first_due());
    }
}
