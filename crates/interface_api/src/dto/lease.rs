//! Lease DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use app_services::NewLease;
use core_kernel::{RoomId, TenantId};
use domain_leasing::MeterBaseline;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeaseRequest {
    pub room_id: RoomId,
    pub tenant_id: TenantId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(custom(function = "super::positive"))]
    pub rent_amount: Decimal,
    #[validate(custom(function = "super::non_negative"))]
    pub deposit: Decimal,
    #[serde(default)]
    pub baseline: Option<MeterBaseline>,
}

impl From<CreateLeaseRequest> for NewLease {
    fn from(request: CreateLeaseRequest) -> Self {
        NewLease {
            room_id: request.room_id,
            tenant_id: request.tenant_id,
            start_date: request.start_date,
            end_date: request.end_date,
            rent_amount: request.rent_amount,
            deposit: request.deposit,
            baseline: request.baseline,
        }
    }
}
