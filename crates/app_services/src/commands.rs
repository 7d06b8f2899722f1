//! Inputs to service operations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BuildingId, RoomId, TenantId};
use domain_billing::BillStatus;
use domain_leasing::MeterBaseline;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuilding {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    pub room_number: String,
    pub area: Decimal,
    /// Water meter when the room is taken into service
    #[serde(default)]
    pub water_reading: Decimal,
    /// Electricity meter when the room is taken into service
    #[serde(default)]
    pub elec_reading: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTenant {
    pub name: String,
    pub phone: String,
}

/// Terms of a lease to sign, amounts in the service currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLease {
    pub room_id: RoomId,
    pub tenant_id: TenantId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Decimal,
    pub deposit: Decimal,
    /// Opening readings for the first bill; the configured default if absent
    #[serde(default)]
    pub baseline: Option<MeterBaseline>,
}

/// Filters for the landlord's bill list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillFilter {
    /// Status as of today, so `Overdue` selects unpaid bills past due
    pub status: Option<BillStatus>,
    pub building_id: Option<BuildingId>,
}
