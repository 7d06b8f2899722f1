//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use app_services::BillingSettings;
use core_kernel::{Currency, Timezone};
use domain_billing::{DueDatePolicy, UtilityRates};
use domain_leasing::MeterBaseline;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Currency for rents, deposits and fees
    pub currency: Currency,
    /// Price per unit of water
    pub water_rate: Decimal,
    /// Price per unit of electricity
    pub elec_rate: Decimal,
    /// Day of the month bills fall due
    pub bill_due_day: u32,
    /// Opening readings of a lease's first bill: `room` or `zero`
    pub meter_baseline: String,
    /// IANA name of the timezone that decides "today"
    pub timezone: Timezone,
    /// Load demo buildings, tenants and a lease into an empty store
    pub seed_demo_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let rates = UtilityRates::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            currency: Currency::default(),
            water_rate: rates.water,
            elec_rate: rates.elec,
            bill_due_day: DueDatePolicy::DEFAULT_DUE_DAY,
            meter_baseline: "room".to_string(),
            timezone: Timezone::default(),
            seed_demo_data: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Billing settings for the service
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` for a negative rate, a due day outside
    /// 1..=31 or an unknown meter baseline.
    pub fn billing_settings(&self) -> Result<BillingSettings, config::ConfigError> {
        let rates = UtilityRates::new(self.water_rate, self.elec_rate)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let due_policy = DueDatePolicy::new(self.bill_due_day)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let default_baseline = self
            .meter_baseline
            .parse::<MeterBaseline>()
            .map_err(config::ConfigError::Message)?;

        Ok(BillingSettings {
            rates,
            due_policy,
            default_baseline,
            currency: self.currency,
        })
    }
}
