//! Bill DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use app_services::BillFilter;
use core_kernel::BuildingId;
use domain_billing::BillStatus;
use crate::error::ApiError;

/// Query string of the bill list
#[derive(Debug, Default, Deserialize)]
pub struct BillQuery {
    /// `pending`, `paid` or `overdue`, any case
    pub status: Option<String>,
    pub building_id: Option<BuildingId>,
}

impl TryFrom<BillQuery> for BillFilter {
    type Error = ApiError;

    fn try_from(query: BillQuery) -> Result<Self, Self::Error> {
        let status = query
            .status
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<BillStatus>())
            .transpose()
            .map_err(ApiError::BadRequest)?;
        Ok(BillFilter {
            status,
            building_id: query.building_id,
        })
    }
}

/// Closing meter values for a bill
#[derive(Debug, Deserialize, Validate)]
pub struct MeterReadingRequest {
    #[validate(custom(function = "super::non_negative"))]
    pub current_water_reading: Decimal,
    #[validate(custom(function = "super::non_negative"))]
    pub current_elec_reading: Decimal,
}
