//! The entity graph held by the store

use std::collections::BTreeMap;

use core_kernel::{BillId, BuildingId, LeaseId, RoomId, TenantId};
use domain_billing::Bill;
use domain_leasing::Lease;
use domain_property::{Building, Room, Tenant};
use crate::error::StoreError;

/// Last identifier handed out per entity
#[derive(Debug, Clone, Default)]
struct Sequences {
    building: i64,
    room: i64,
    tenant: i64,
    lease: i64,
    bill: i64,
}

/// Buildings with their rooms, tenants, and leases with their bills
///
/// Rooms live inside their building and bills inside their lease; the
/// indexes map a room or bill id back to its owner.
#[derive(Debug, Clone, Default)]
pub struct PropertyState {
    buildings: BTreeMap<BuildingId, Building>,
    tenants: BTreeMap<TenantId, Tenant>,
    leases: BTreeMap<LeaseId, Lease>,
    room_index: BTreeMap<RoomId, BuildingId>,
    bill_index: BTreeMap<BillId, LeaseId>,
    sequences: Sequences,
}

impl PropertyState {
    // ------------------------------------------------------------------
    // Identifier allocation
    // ------------------------------------------------------------------

    pub fn next_building_id(&mut self) -> BuildingId {
        self.sequences.building += 1;
        BuildingId::new(self.sequences.building)
    }

    pub fn next_room_id(&mut self) -> RoomId {
        self.sequences.room += 1;
        RoomId::new(self.sequences.room)
    }

    pub fn next_tenant_id(&mut self) -> TenantId {
        self.sequences.tenant += 1;
        TenantId::new(self.sequences.tenant)
    }

    pub fn next_lease_id(&mut self) -> LeaseId {
        self.sequences.lease += 1;
        LeaseId::new(self.sequences.lease)
    }

    pub fn next_bill_id(&mut self) -> BillId {
        self.sequences.bill += 1;
        BillId::new(self.sequences.bill)
    }

    // ------------------------------------------------------------------
    // Buildings and rooms
    // ------------------------------------------------------------------

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn building(&self, id: BuildingId) -> Result<&Building, StoreError> {
        self.buildings
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Building", id))
    }

    pub fn insert_building(&mut self, building: Building) {
        for room in building.rooms() {
            self.room_index.insert(room.id, building.id);
        }
        self.buildings.insert(building.id, building);
    }

    /// Adds a room to its building and indexes it
    pub fn add_room(&mut self, room: Room) -> Result<(), StoreError> {
        let room_id = room.id;
        let building_id = room.building_id;
        let building = self
            .buildings
            .get_mut(&building_id)
            .ok_or_else(|| StoreError::not_found("Building", building_id))?;
        building.add_room(room)?;
        self.room_index.insert(room_id, building_id);
        Ok(())
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, StoreError> {
        self.room_index
            .get(&id)
            .and_then(|building_id| self.buildings.get(building_id))
            .and_then(|building| building.room(id))
            .ok_or_else(|| StoreError::not_found("Room", id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, StoreError> {
        let building_id = self
            .room_index
            .get(&id)
            .copied()
            .ok_or_else(|| StoreError::not_found("Room", id))?;
        self.buildings
            .get_mut(&building_id)
            .and_then(|building| building.room_mut(id))
            .ok_or_else(|| StoreError::not_found("Room", id))
    }

    // ------------------------------------------------------------------
    // Tenants
    // ------------------------------------------------------------------

    pub fn tenants(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.values()
    }

    pub fn tenant(&self, id: TenantId) -> Result<&Tenant, StoreError> {
        self.tenants
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Tenant", id))
    }

    pub fn insert_tenant(&mut self, tenant: Tenant) {
        self.tenants.insert(tenant.id, tenant);
    }

    // ------------------------------------------------------------------
    // Leases and bills
    // ------------------------------------------------------------------

    pub fn leases(&self) -> impl Iterator<Item = &Lease> {
        self.leases.values()
    }

    pub fn lease(&self, id: LeaseId) -> Result<&Lease, StoreError> {
        self.leases
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Lease", id))
    }

    pub fn lease_mut(&mut self, id: LeaseId) -> Result<&mut Lease, StoreError> {
        self.leases
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Lease", id))
    }

    /// Stores a lease and indexes the bills it holds
    pub fn insert_lease(&mut self, lease: Lease) {
        for bill in lease.bills() {
            self.bill_index.insert(bill.id, lease.id);
        }
        self.leases.insert(lease.id, lease);
    }

    /// The tenant's active lease, if any
    pub fn active_lease_for_tenant(&self, tenant_id: TenantId) -> Option<&Lease> {
        self.leases
            .values()
            .find(|lease| lease.tenant_id == tenant_id && lease.is_active())
    }

    pub fn active_lease_ids(&self) -> Vec<LeaseId> {
        self.leases
            .values()
            .filter(|lease| lease.is_active())
            .map(|lease| lease.id)
            .collect()
    }

    /// A lease together with the room it lets, both mutable
    pub fn lease_and_room_mut(&mut self, id: LeaseId) -> Result<(&mut Lease, &mut Room), StoreError> {
        let lease = self
            .leases
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Lease", id))?;
        let room_id = lease.room_id;
        let room = self
            .room_index
            .get(&room_id)
            .and_then(|building_id| self.buildings.get_mut(building_id))
            .and_then(|building| building.room_mut(room_id))
            .ok_or_else(|| StoreError::not_found("Room", room_id))?;
        Ok((lease, room))
    }

    /// Records which lease owns a newly issued bill
    pub fn index_bill(&mut self, bill_id: BillId, lease_id: LeaseId) {
        self.bill_index.insert(bill_id, lease_id);
    }

    pub fn lease_id_for_bill(&self, id: BillId) -> Result<LeaseId, StoreError> {
        self.bill_index
            .get(&id)
            .copied()
            .ok_or_else(|| StoreError::not_found("Bill", id))
    }

    /// A bill with the lease that owns it
    pub fn bill(&self, id: BillId) -> Result<(&Lease, &Bill), StoreError> {
        let lease = self.lease(self.lease_id_for_bill(id)?)?;
        let bill = lease.bill(id).ok_or_else(|| StoreError::not_found("Bill", id))?;
        Ok((lease, bill))
    }

    /// Every bill with its owning lease, oldest first
    pub fn bills(&self) -> impl Iterator<Item = (&Lease, &Bill)> {
        self.bill_index.iter().filter_map(|(bill_id, lease_id)| {
            let lease = self.leases.get(lease_id)?;
            lease.bill(*bill_id).map(|bill| (lease, bill))
        })
    }

    /// The most recently issued bill for any lease on the room
    pub fn latest_bill_for_room(&self, room_id: RoomId) -> Option<BillId> {
        self.leases
            .values()
            .filter(|lease| lease.room_id == room_id)
            .filter_map(|lease| lease.latest_bill().map(|bill| bill.id))
            .max()
    }

    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.buildings.len(),
            self.room_index.len(),
            self.tenants.len(),
            self.leases.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_property::MeterReadings;
    use rust_decimal_macros::dec;

    fn state_with_room() -> (PropertyState, RoomId) {
        let mut state = PropertyState::default();
        let building_id = state.next_building_id();
        state.insert_building(Building::new(building_id, "Building A", "123 Main Street").unwrap());
        let room_id = state.next_room_id();
        let room = Room::new(room_id, building_id, "A-101", dec!(25), MeterReadings::zero()).unwrap();
        state.add_room(room).unwrap();
        (state, room_id)
    }

    #[test]
    fn test_ids_are_sequential_per_entity() {
        let mut state = PropertyState::default();
        assert_eq!(state.next_building_id(), BuildingId::new(1));
        assert_eq!(state.next_building_id(), BuildingId::new(2));
        assert_eq!(state.next_room_id(), RoomId::new(1));
    }

    #[test]
    fn test_room_lookup_through_index() {
        let (mut state, room_id) = state_with_room();
        assert_eq!(state.room(room_id).unwrap().room_number, "A-101");
        state.room_mut(room_id).unwrap().occupy().unwrap();
        assert!(!state.room(room_id).unwrap().is_vacant());
    }

    #[test]
    fn test_room_for_unknown_building() {
        let mut state = PropertyState::default();
        let room = Room::new(RoomId::new(1), BuildingId::new(9), "X-1", dec!(10), MeterReadings::zero()).unwrap();
        assert_eq!(state.add_room(room), Err(StoreError::not_found("Building", BuildingId::new(9))));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let state = PropertyState::default();
        assert!(matches!(state.room(RoomId::new(1)), Err(StoreError::NotFound { entity: "Room", .. })));
        assert!(matches!(state.bill(BillId::new(1)), Err(StoreError::NotFound { entity: "Bill", .. })));
    }
}
