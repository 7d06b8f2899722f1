//! Read models returned by the service
//!
//! Views flatten the entity graph for callers: a bill carries its room
//! number and tenant name, and its status is projected onto the day the
//! view was built.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, BuildingId, Currency, LeaseId, RoomId, TenantId};
use domain_billing::{Bill, BillStatus};
use domain_leasing::{Lease, LeaseStatus, Termination};
use domain_property::{Building, MeterReadings, Room, RoomStatus};
use infra_store::PropertyState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub building_id: BuildingId,
    pub room_number: String,
    pub area: Decimal,
    pub status: RoomStatus,
    pub status_label: String,
    pub last_water_reading: Decimal,
    pub last_elec_reading: Decimal,
}

impl From<&Room> for RoomView {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            building_id: room.building_id,
            room_number: room.room_number.clone(),
            area: room.area,
            status: room.status(),
            status_label: room.status().label().to_string(),
            last_water_reading: room.last_water_reading(),
            last_elec_reading: room.last_elec_reading(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub vacant_rooms: usize,
    pub rooms: Vec<RoomView>,
}

impl From<&Building> for BuildingView {
    fn from(building: &Building) -> Self {
        Self {
            id: building.id,
            name: building.name.clone(),
            address: building.address.clone(),
            vacant_rooms: building.vacant_count(),
            rooms: building.rooms().iter().map(RoomView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillView {
    pub id: BillId,
    pub lease_id: LeaseId,
    pub room_id: RoomId,
    pub room_number: String,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub period: String,
    pub rent_fee: Decimal,
    pub water_fee: Decimal,
    pub elec_fee: Decimal,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub status: BillStatus,
    pub status_label: String,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
    pub paid_on: Option<NaiveDate>,
    pub opening_readings: MeterReadings,
    pub closing_readings: MeterReadings,
}

impl BillView {
    pub fn build(state: &PropertyState, lease: &Lease, bill: &Bill, today: NaiveDate) -> Self {
        let status = bill.status_on(today);
        Self {
            id: bill.id,
            lease_id: lease.id,
            room_id: lease.room_id,
            room_number: room_number(state, lease.room_id),
            tenant_id: lease.tenant_id,
            tenant_name: tenant_name(state, lease.tenant_id),
            period: bill.period.label(),
            rent_fee: bill.rent_fee().amount(),
            water_fee: bill.water_fee().amount(),
            elec_fee: bill.elec_fee().amount(),
            total_amount: bill.total_amount().amount(),
            currency: bill.total_amount().currency(),
            status,
            status_label: status.label().to_string(),
            due_date: bill.due_date,
            days_overdue: bill.days_overdue(today),
            paid_on: bill.paid_on(),
            opening_readings: bill.opening_readings(),
            closing_readings: bill.closing_readings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseView {
    pub id: LeaseId,
    pub room_id: RoomId,
    pub room_number: String,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Decimal,
    pub deposit: Decimal,
    pub currency: Currency,
    pub status: LeaseStatus,
    pub status_label: String,
    pub termination: Option<Termination>,
    pub bills: Vec<BillView>,
}

impl LeaseView {
    pub fn build(state: &PropertyState, lease: &Lease, today: NaiveDate) -> Self {
        Self {
            id: lease.id,
            room_id: lease.room_id,
            room_number: room_number(state, lease.room_id),
            tenant_id: lease.tenant_id,
            tenant_name: tenant_name(state, lease.tenant_id),
            start_date: lease.start_date(),
            end_date: lease.end_date(),
            rent_amount: lease.rent_amount.amount(),
            deposit: lease.deposit.amount(),
            currency: lease.rent_amount.currency(),
            status: lease.status(),
            status_label: lease.status().label().to_string(),
            termination: lease.termination(),
            bills: lease
                .bills()
                .iter()
                .map(|bill| BillView::build(state, lease, bill, today))
                .collect(),
        }
    }
}

fn room_number(state: &PropertyState, id: RoomId) -> String {
    state
        .room(id)
        .map(|room| room.room_number.clone())
        .unwrap_or_default()
}

fn tenant_name(state: &PropertyState, id: TenantId) -> String {
    state
        .tenant(id)
        .map(|tenant| tenant.name.clone())
        .unwrap_or_default()
}
