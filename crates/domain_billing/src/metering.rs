//! Utility meters, unit rates and usage

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money};
use domain_property::MeterReadings;
use crate::error::BillingError;

/// The two metered utilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterKind {
    Water,
    Electricity,
}

impl fmt::Display for MeterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeterKind::Water => f.write_str("water"),
            MeterKind::Electricity => f.write_str("electricity"),
        }
    }
}

/// Price per metered unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityRates {
    /// Price per cubic metre of water
    pub water: Decimal,
    /// Price per kWh of electricity
    pub elec: Decimal,
}

impl UtilityRates {
    pub fn new(water: Decimal, elec: Decimal) -> Result<Self, BillingError> {
        if water.is_sign_negative() && !water.is_zero() {
            return Err(BillingError::InvalidRate { meter: MeterKind::Water, rate: water });
        }
        if elec.is_sign_negative() && !elec.is_zero() {
            return Err(BillingError::InvalidRate { meter: MeterKind::Electricity, rate: elec });
        }
        Ok(Self { water, elec })
    }
}

impl Default for UtilityRates {
    fn default() -> Self {
        Self {
            water: dec!(5.00),
            elec: dec!(1.00),
        }
    }
}

/// Consumption between two snapshots of a room's meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub water: Decimal,
    pub elec: Decimal,
}

impl Usage {
    /// Measures consumption from `previous` to `current`
    ///
    /// # Errors
    ///
    /// Returns `InvalidReading` if either meter reads lower than before; a
    /// physical meter cannot run backwards.
    pub fn between(previous: &MeterReadings, current: &MeterReadings) -> Result<Self, BillingError> {
        if current.water < previous.water {
            return Err(BillingError::InvalidReading {
                meter: MeterKind::Water,
                previous: previous.water,
                current: current.water,
            });
        }
        if current.elec < previous.elec {
            return Err(BillingError::InvalidReading {
                meter: MeterKind::Electricity,
                previous: previous.elec,
                current: current.elec,
            });
        }
        Ok(Self {
            water: current.water - previous.water,
            elec: current.elec - previous.elec,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.water.is_zero() && self.elec.is_zero()
    }

    /// Water charge, rounded half-up to the currency's minor unit
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the charge does not fit a decimal.
    pub fn water_fee(&self, rates: &UtilityRates, currency: Currency) -> Result<Money, BillingError> {
        charge(MeterKind::Water, self.water, rates.water, currency)
    }

    /// Electricity charge, rounded half-up to the currency's minor unit
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the charge does not fit a decimal.
    pub fn elec_fee(&self, rates: &UtilityRates, currency: Currency) -> Result<Money, BillingError> {
        charge(MeterKind::Electricity, self.elec, rates.elec, currency)
    }
}

fn charge(meter: MeterKind, usage: Decimal, rate: Decimal, currency: Currency) -> Result<Money, BillingError> {
    usage
        .checked_mul(rate)
        .map(|amount| Money::new_rounded(amount, currency))
        .ok_or(BillingError::AmountOverflow { meter, usage, rate })
}
