//! Billing settings shared by all operations

use core_kernel::Currency;
use domain_billing::{DueDatePolicy, UtilityRates};
use domain_leasing::MeterBaseline;

/// Rates, due day, first-bill baseline and currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillingSettings {
    pub rates: UtilityRates,
    pub due_policy: DueDatePolicy,
    pub default_baseline: MeterBaseline,
    pub currency: Currency,
}
