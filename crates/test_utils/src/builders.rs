//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{BuildingId, Money, RoomId, TenantId};
use domain_leasing::{LeaseLifecycle, LeaseTerms, MeterBaseline};
use domain_property::{Building, MeterReadings, Room, Tenant};
use fake::faker::name::en::Name;
use fake::Fake;
use infra_store::PropertyState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{MoneyFixtures, ReadingFixtures, TemporalFixtures};

/// A mainland mobile number with random digits
pub fn fake_phone() -> String {
    format!("138{}", (10_000_000u32..100_000_000).fake::<u32>())
}

/// Builder for constructing test rooms
pub struct TestRoomBuilder {
    id: RoomId,
    building_id: BuildingId,
    room_number: String,
    area: Decimal,
    readings: MeterReadings,
}

impl Default for TestRoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoomBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: RoomId::new(1),
            building_id: BuildingId::new(1),
            room_number: "A-101".to_string(),
            area: dec!(50),
            readings: ReadingFixtures::at_signing(),
        }
    }

    pub fn with_id(mut self, id: RoomId) -> Self {
        self.id = id;
        self
    }

    pub fn with_building_id(mut self, id: BuildingId) -> Self {
        self.building_id = id;
        self
    }

    pub fn with_room_number(mut self, number: impl Into<String>) -> Self {
        self.room_number = number.into();
        self
    }

    pub fn with_area(mut self, area: Decimal) -> Self {
        self.area = area;
        self
    }

    /// Sets the readings the room starts with
    pub fn with_readings(mut self, readings: MeterReadings) -> Self {
        self.readings = readings;
        self
    }

    /// Builds a vacant room
    pub fn build(self) -> Room {
        Room::new(self.id, self.building_id, self.room_number, self.area, self.readings)
            .expect("test room should be valid")
    }
}

/// Builder for constructing test tenants with generated names and phones
pub struct TestTenantBuilder {
    id: TenantId,
    name: String,
    phone: String,
}

impl Default for TestTenantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTenantBuilder {
    pub fn new() -> Self {
        Self {
            id: TenantId::new(1),
            name: Name().fake(),
            phone: fake_phone(),
        }
    }

    pub fn with_id(mut self, id: TenantId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn build(self) -> Tenant {
        Tenant::new(self.id, self.name, self.phone).expect("test tenant should be valid")
    }
}

/// Builder for lease terms
///
/// Defaults to room 1 and tenant 1 for calendar 2024 at 3000 rent and
/// 6000 deposit.
pub struct TestLeaseTermsBuilder {
    room_id: RoomId,
    tenant_id: TenantId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    rent_amount: Money,
    deposit: Money,
}

impl Default for TestLeaseTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLeaseTermsBuilder {
    pub fn new() -> Self {
        Self {
            room_id: RoomId::new(1),
            tenant_id: TenantId::new(1),
            start_date: TemporalFixtures::lease_start(),
            end_date: TemporalFixtures::lease_end(),
            rent_amount: MoneyFixtures::cny_rent(),
            deposit: MoneyFixtures::cny_deposit(),
        }
    }

    pub fn with_room_id(mut self, id: RoomId) -> Self {
        self.room_id = id;
        self
    }

    pub fn with_tenant_id(mut self, id: TenantId) -> Self {
        self.tenant_id = id;
        self
    }

    /// Sets both ends of the term
    pub fn with_term(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_rent(mut self, rent: Money) -> Self {
        self.rent_amount = rent;
        self
    }

    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn build(self) -> LeaseTerms {
        LeaseTerms {
            room_id: self.room_id,
            tenant_id: self.tenant_id,
            start_date: self.start_date,
            end_date: self.end_date,
            rent_amount: self.rent_amount,
            deposit: self.deposit,
        }
    }
}

/// Builder for a populated entity graph
///
/// Everything goes into one building. Ids are handed out in insertion
/// order starting from 1, so the first room is `RoomId::new(1)`.
pub struct TestStateBuilder {
    rooms: Vec<(String, MeterReadings)>,
    tenants: Vec<String>,
    leases: Vec<LeaseTerms>,
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            tenants: Vec::new(),
            leases: Vec::new(),
        }
    }

    pub fn with_room(mut self, number: impl Into<String>, readings: MeterReadings) -> Self {
        self.rooms.push((number.into(), readings));
        self
    }

    pub fn with_tenant(mut self, name: impl Into<String>) -> Self {
        self.tenants.push(name.into());
        self
    }

    /// Signs a lease after all rooms and tenants are in place
    pub fn with_lease(mut self, terms: LeaseTerms) -> Self {
        self.leases.push(terms);
        self
    }

    pub fn build(self) -> PropertyState {
        let mut state = PropertyState::default();
        let building_id = state.next_building_id();
        let building = Building::new(building_id, "Building A", "123 Main Street")
            .expect("test building should be valid");
        state.insert_building(building);

        for (number, readings) in self.rooms {
            let room = TestRoomBuilder::new()
                .with_id(state.next_room_id())
                .with_building_id(building_id)
                .with_room_number(number)
                .with_readings(readings)
                .build();
            state.add_room(room).expect("test room should be added");
        }

        for name in self.tenants {
            let tenant = TestTenantBuilder::new()
                .with_id(state.next_tenant_id())
                .with_name(name)
                .build();
            state.insert_tenant(tenant);
        }

        let lifecycle = LeaseLifecycle::default();
        for terms in self.leases {
            let lease_id = state.next_lease_id();
            let bill_id = state.next_bill_id();
            let existing = state.active_lease_for_tenant(terms.tenant_id).map(|l| l.id);
            let room = state.room_mut(terms.room_id).expect("lease room should exist");
            let lease = lifecycle
                .sign(lease_id, bill_id, &terms, room, existing, MeterBaseline::RoomReadings)
                .expect("test lease should sign");
            state.insert_lease(lease);
        }

        state
    }
}
