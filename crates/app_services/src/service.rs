//! Property management service
//!
//! Every operation takes the caller's [`Session`], checks it, and runs
//! as a single store transaction. Reads see a snapshot taken after any
//! ended leases have been expired.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use core_kernel::{BillId, BuildingId, Clock, LeaseId, Money, RoomId, TenantId};
use domain_billing::{BillLifecycle, BillingEngine, BillingError};
use domain_leasing::{LeaseLifecycle, LeaseTerms};
use domain_property::{Building, MeterReadings, Room, RoomStatus, Tenant};
use infra_store::{PropertyState, PropertyStore};

use crate::commands::{BillFilter, NewBuilding, NewLease, NewRoom, NewTenant};
use crate::error::ServiceError;
use crate::session::Session;
use crate::settings::BillingSettings;
use crate::views::{BillView, BuildingView, LeaseView, RoomView};

/// Buildings, tenants, leases and bills behind one store
#[derive(Clone)]
pub struct PropertyService {
    store: PropertyStore,
    clock: Arc<dyn Clock>,
    settings: BillingSettings,
    leases: LeaseLifecycle,
    bills: BillLifecycle,
}

impl PropertyService {
    pub fn new(store: PropertyStore, clock: Arc<dyn Clock>, settings: BillingSettings) -> Self {
        let engine = BillingEngine::new(settings.rates);
        Self {
            store,
            clock,
            settings,
            leases: LeaseLifecycle::new(engine, settings.due_policy),
            bills: BillLifecycle::new(engine),
        }
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn settings(&self) -> &BillingSettings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ========================================================================
    // Buildings and rooms
    // ========================================================================

    /// All buildings with their rooms
    pub async fn list_buildings(&self, _session: &Session) -> Result<Vec<BuildingView>, ServiceError> {
        self.read(|state, _| Ok(state.buildings().map(BuildingView::from).collect()))
            .await
    }

    pub async fn get_building(&self, _session: &Session, id: BuildingId) -> Result<BuildingView, ServiceError> {
        self.read(|state, _| Ok(BuildingView::from(state.building(id)?)))
            .await
    }

    pub async fn create_building(&self, session: &Session, cmd: NewBuilding) -> Result<BuildingView, ServiceError> {
        session.require_landlord("create_building")?;
        self.write(|state, _| {
            let id = state.next_building_id();
            let building = Building::new(id, cmd.name, cmd.address)?;
            let view = BuildingView::from(&building);
            state.insert_building(building);
            info!(building_id = %id, name = %view.name, "Building created");
            Ok(view)
        })
        .await
    }

    pub async fn create_room(
        &self,
        session: &Session,
        building_id: BuildingId,
        cmd: NewRoom,
    ) -> Result<RoomView, ServiceError> {
        session.require_landlord("create_room")?;
        self.write(|state, _| {
            state.building(building_id)?;
            let id = state.next_room_id();
            let readings = MeterReadings::new(cmd.water_reading, cmd.elec_reading);
            let room = Room::new(id, building_id, cmd.room_number, cmd.area, readings)?;
            let view = RoomView::from(&room);
            state.add_room(room)?;
            info!(room_id = %id, building_id = %building_id, room_number = %view.room_number, "Room created");
            Ok(view)
        })
        .await
    }

    /// Moves a room between Vacant and Maintenance
    pub async fn update_room_status(
        &self,
        session: &Session,
        room_id: RoomId,
        status: RoomStatus,
    ) -> Result<RoomView, ServiceError> {
        session.require_landlord("update_room_status")?;
        self.write(|state, _| {
            let room = state.room_mut(room_id)?;
            room.set_status(status)?;
            Ok(RoomView::from(&*room))
        })
        .await
    }

    // ========================================================================
    // Tenants
    // ========================================================================

    pub async fn list_tenants(&self, _session: &Session) -> Result<Vec<Tenant>, ServiceError> {
        self.read(|state, _| Ok(state.tenants().cloned().collect()))
            .await
    }

    pub async fn get_tenant(&self, _session: &Session, id: TenantId) -> Result<Tenant, ServiceError> {
        self.read(|state, _| Ok(state.tenant(id)?.clone())).await
    }

    pub async fn create_tenant(&self, session: &Session, cmd: NewTenant) -> Result<Tenant, ServiceError> {
        session.require_landlord("create_tenant")?;
        self.write(|state, _| {
            let id = state.next_tenant_id();
            let tenant = Tenant::new(id, cmd.name, cmd.phone)?;
            state.insert_tenant(tenant.clone());
            info!(tenant_id = %id, "Tenant created");
            Ok(tenant)
        })
        .await
    }

    // ========================================================================
    // Leases
    // ========================================================================

    /// All leases with their bills
    pub async fn list_leases(&self, session: &Session) -> Result<Vec<LeaseView>, ServiceError> {
        session.require_landlord("list_leases")?;
        self.read(|state, today| {
            Ok(state
                .leases()
                .map(|lease| LeaseView::build(state, lease, today))
                .collect())
        })
        .await
    }

    pub async fn get_lease(&self, session: &Session, id: LeaseId) -> Result<LeaseView, ServiceError> {
        session.require_landlord("get_lease")?;
        self.read(|state, today| Ok(LeaseView::build(state, state.lease(id)?, today)))
            .await
    }

    /// Signs a lease, occupying the room and issuing the first bill
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown room or tenant
    /// - `Validation` for inconsistent terms
    /// - `Lease(RoomUnavailable)` if the room is not vacant, including when
    ///   a concurrent signing took it first
    /// - `Lease(DuplicateActiveLease)` if the tenant already has a lease
    pub async fn create_lease(&self, session: &Session, cmd: NewLease) -> Result<LeaseView, ServiceError> {
        session.require_landlord("create_lease")?;
        let currency = self.settings.currency;
        let baseline = cmd.baseline.unwrap_or(self.settings.default_baseline);
        let terms = LeaseTerms {
            room_id: cmd.room_id,
            tenant_id: cmd.tenant_id,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            rent_amount: Money::new(cmd.rent_amount, currency),
            deposit: Money::new(cmd.deposit, currency),
        };

        self.write(|state, today| {
            state.tenant(terms.tenant_id)?;
            let existing = state.active_lease_for_tenant(terms.tenant_id).map(|lease| lease.id);
            let lease_id = state.next_lease_id();
            let bill_id = state.next_bill_id();

            let room = state.room_mut(terms.room_id)?;
            let lease = self.leases.sign(lease_id, bill_id, &terms, room, existing, baseline)?;
            state.insert_lease(lease);

            Ok(LeaseView::build(state, state.lease(lease_id)?, today))
        })
        .await
    }

    /// Ends an active lease today and vacates its room
    pub async fn terminate_lease(&self, session: &Session, id: LeaseId) -> Result<LeaseView, ServiceError> {
        session.require_landlord("terminate_lease")?;
        self.write(|state, today| {
            let (lease, room) = state.lease_and_room_mut(id)?;
            self.leases.terminate(lease, room, today)?;
            Ok(LeaseView::build(state, state.lease(id)?, today))
        })
        .await
    }

    /// Issues the lease's bill for the following month
    pub async fn issue_next_bill(&self, session: &Session, lease_id: LeaseId) -> Result<BillView, ServiceError> {
        session.require_landlord("issue_next_bill")?;
        self.write(|state, today| {
            let bill_id = state.next_bill_id();
            let (lease, room) = state.lease_and_room_mut(lease_id)?;
            self.leases.issue_next_bill(lease, room, bill_id)?;
            state.index_bill(bill_id, lease_id);
            bill_view(state, bill_id, today)
        })
        .await
    }

    // ========================================================================
    // Bills
    // ========================================================================

    /// Bills across all leases, filtered by status as of today and building
    pub async fn list_bills(&self, session: &Session, filter: BillFilter) -> Result<Vec<BillView>, ServiceError> {
        session.require_landlord("list_bills")?;
        self.read(|state, today| {
            Ok(state
                .bills()
                .filter(|(lease, _)| match filter.building_id {
                    Some(building_id) => state
                        .room(lease.room_id)
                        .map(|room| room.building_id == building_id)
                        .unwrap_or(false),
                    None => true,
                })
                .filter(|(_, bill)| match filter.status {
                    Some(status) => bill.status_on(today) == status,
                    None => true,
                })
                .map(|(lease, bill)| BillView::build(state, lease, bill, today))
                .collect())
        })
        .await
    }

    pub async fn get_bill(&self, session: &Session, id: BillId) -> Result<BillView, ServiceError> {
        session.require_landlord("get_bill")?;
        self.read(|state, today| bill_view(state, id, today)).await
    }

    /// Records closing meter readings on an unpaid bill and reprices it
    ///
    /// # Errors
    ///
    /// - `Billing(BillClosed)` if the bill is paid
    /// - `Billing(Superseded)` if a later bill exists for the same room
    /// - `Billing(InvalidReading)` if a meter would go backwards
    pub async fn submit_meter_reading(
        &self,
        session: &Session,
        bill_id: BillId,
        water: Decimal,
        elec: Decimal,
    ) -> Result<BillView, ServiceError> {
        session.require_landlord("submit_meter_reading")?;
        self.write(|state, today| {
            let (lease, bill) = state.bill(bill_id)?;
            let lease_id = lease.id;
            if !bill.is_paid() {
                if let Some(later) = state
                    .latest_bill_for_room(lease.room_id)
                    .filter(|latest| *latest != bill_id)
                {
                    return Err(BillingError::Superseded { bill_id, later }.into());
                }
            }

            let (lease, room) = state.lease_and_room_mut(lease_id)?;
            let bill = lease
                .bill_mut(bill_id)
                .ok_or_else(|| ServiceError::not_found("Bill", bill_id))?;
            self.bills
                .add_meter_reading(bill, room, MeterReadings::new(water, elec))?;

            bill_view(state, bill_id, today)
        })
        .await
    }

    // ========================================================================
    // Tenant self-service
    // ========================================================================

    /// The caller's active lease
    pub async fn get_my_lease(&self, session: &Session) -> Result<LeaseView, ServiceError> {
        let tenant_id = session.require_tenant()?;
        self.read(|state, today| {
            let lease = state
                .active_lease_for_tenant(tenant_id)
                .ok_or_else(|| ServiceError::not_found("Active lease", tenant_id))?;
            Ok(LeaseView::build(state, lease, today))
        })
        .await
    }

    /// Every bill on any of the caller's leases
    pub async fn get_my_bills(&self, session: &Session) -> Result<Vec<BillView>, ServiceError> {
        let tenant_id = session.require_tenant()?;
        self.read(|state, today| {
            Ok(state
                .bills()
                .filter(|(lease, _)| lease.tenant_id == tenant_id)
                .map(|(lease, bill)| BillView::build(state, lease, bill, today))
                .collect())
        })
        .await
    }

    /// Pays one of the caller's bills
    ///
    /// A bill on another tenant's lease is reported as not found.
    pub async fn pay_my_bill(&self, session: &Session, bill_id: BillId) -> Result<BillView, ServiceError> {
        let tenant_id = session.require_tenant()?;
        self.write(|state, today| {
            let lease_id = state.lease_id_for_bill(bill_id)?;
            let lease = state.lease_mut(lease_id)?;
            if lease.tenant_id != tenant_id {
                debug!(bill_id = %bill_id, tenant_id = %tenant_id, "Bill belongs to another tenant");
                return Err(ServiceError::not_found("Bill", bill_id));
            }
            let bill = lease
                .bill_mut(bill_id)
                .ok_or_else(|| ServiceError::not_found("Bill", bill_id))?;
            self.bills.pay(bill, today)?;

            bill_view(state, bill_id, today)
        })
        .await
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Runs `f` on a snapshot, after expiring ended leases
    pub(crate) async fn read<T>(
        &self,
        f: impl FnOnce(&PropertyState, NaiveDate) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let today = self.today();
        let pending = self
            .store
            .read(|state| {
                state
                    .leases()
                    .any(|lease| lease.is_active() && lease.term.has_ended(today))
            })
            .await;
        if pending {
            self.store
                .transaction(|state| self.expire_ended(state, today))
                .await?;
        }
        self.store.read(|state| f(state, today)).await
    }

    /// Runs `f` as one transaction, after expiring ended leases in it
    pub(crate) async fn write<T>(
        &self,
        f: impl FnOnce(&mut PropertyState, NaiveDate) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let today = self.today();
        self.store
            .transaction(|state| {
                self.expire_ended(state, today)?;
                f(state, today)
            })
            .await
    }

    fn expire_ended(&self, state: &mut PropertyState, today: NaiveDate) -> Result<usize, ServiceError> {
        let mut expired = 0;
        for id in state.active_lease_ids() {
            let (lease, room) = state.lease_and_room_mut(id)?;
            if self.leases.expire_if_ended(lease, room, today)? {
                expired += 1;
            }
        }
        if expired > 0 {
            info!(expired, today = %today, "Expired ended leases");
        }
        Ok(expired)
    }
}

fn bill_view(state: &PropertyState, id: BillId, today: NaiveDate) -> Result<BillView, ServiceError> {
    let (lease, bill) = state.bill(id)?;
    Ok(BillView::build(state, lease, bill, today))
}
