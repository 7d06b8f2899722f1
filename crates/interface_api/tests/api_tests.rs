//! HTTP round trips through the router

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use app_services::{BillView, BuildingView, LeaseView, PropertyService};
use core_kernel::FixedClock;
use infra_store::PropertyStore;
use interface_api::{config::ApiConfig, create_router, error::ErrorResponse};
use test_utils::{ReadingFixtures, TemporalFixtures, TestStateBuilder};

fn role() -> HeaderName {
    HeaderName::from_static("x-role")
}

fn tenant_id() -> HeaderName {
    HeaderName::from_static("x-tenant-id")
}

fn landlord() -> HeaderValue {
    HeaderValue::from_static("landlord")
}

/// Three vacant rooms at 100/400 and two tenants, today being `today`
fn server_on(store: &PropertyStore, today: chrono::NaiveDate) -> TestServer {
    let config = ApiConfig::default();
    let service = PropertyService::new(
        store.clone(),
        Arc::new(FixedClock(today)),
        config.billing_settings().unwrap(),
    );
    TestServer::new(create_router(service, config)).unwrap()
}

fn populated_store() -> PropertyStore {
    PropertyStore::with_state(
        TestStateBuilder::new()
            .with_room("A-101", ReadingFixtures::at_signing())
            .with_room("A-102", ReadingFixtures::at_signing())
            .with_room("A-103", ReadingFixtures::at_signing())
            .with_tenant("User1")
            .with_tenant("User2")
            .build(),
    )
}

fn lease_body(room_id: i64, tenant_id: i64) -> Value {
    json!({
        "room_id": room_id,
        "tenant_id": tenant_id,
        "start_date": "2024-01-01",
        "end_date": "2024-12-31",
        "rent_amount": "3000",
        "deposit": "6000"
    })
}

// ============================================================================
// Public routes
// ============================================================================

mod public_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let server = server_on(&PropertyStore::new(), TemporalFixtures::lease_start());

        server.get("/health").await.assert_status_ok();

        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        let body: Value = ready.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_buildings_need_no_session() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());

        let response = server.get("/api/buildings").await;

        response.assert_status_ok();
        let buildings: Vec<BuildingView> = response.json();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].rooms.len(), 3);
        assert_eq!(buildings[0].vacant_rooms, 3);
    }

    #[tokio::test]
    async fn test_unknown_building_is_404() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());

        let response = server.get("/api/buildings/42").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Building not found: BLD-42");
    }
}

// ============================================================================
// Landlord routes
// ============================================================================

mod landlord_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_building_and_room() {
        let server = server_on(&PropertyStore::new(), TemporalFixtures::lease_start());

        let response = server
            .post("/api/buildings")
            .add_header(role(), landlord())
            .json(&json!({ "name": "Building C", "address": "789 Pine Road" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let building: BuildingView = response.json();

        let response = server
            .post(&format!("/api/buildings/{}/rooms", building.id.value()))
            .add_header(role(), landlord())
            .json(&json!({ "room_number": "C-301", "area": "40", "water_reading": "12", "elec_reading": "30" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let room: Value = response.json();
        assert_eq!(room["status"], "Vacant");
        assert_eq!(room["room_number"], "C-301");
    }

    #[tokio::test]
    async fn test_tenant_cannot_create_buildings() {
        let server = server_on(&PropertyStore::new(), TemporalFixtures::lease_start());

        let response = server
            .post("/api/buildings")
            .add_header(tenant_id(), HeaderValue::from_static("1"))
            .json(&json!({ "name": "Building C", "address": "789 Pine Road" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "forbidden");
    }

    #[tokio::test]
    async fn test_blank_building_name_is_422() {
        let server = server_on(&PropertyStore::new(), TemporalFixtures::lease_start());

        let response = server
            .post("/api/buildings")
            .add_header(role(), landlord())
            .json(&json!({ "name": "", "address": "789 Pine Road" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let server = server_on(&PropertyStore::new(), TemporalFixtures::lease_start());

        let response = server
            .post("/api/tenants")
            .add_header(role(), landlord())
            .json(&json!({ "name": "User3" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "bad_request");
    }

    #[tokio::test]
    async fn test_sign_lease_then_conflict() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());

        let response = server
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(2, 1))
            .await;
        response.assert_status(StatusCode::CREATED);
        let lease: LeaseView = response.json();
        assert_eq!(lease.status_label, "Active");
        assert_eq!(lease.bills.len(), 1);
        assert_eq!(lease.bills[0].total_amount, dec!(3000));

        let response = server
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(2, 2))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_meter_reading_round_trip() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());
        server
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(1, 1))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/bills/1/meter-reading")
            .add_header(role(), landlord())
            .json(&json!({ "current_water_reading": "120", "current_elec_reading": "450" }))
            .await;
        response.assert_status_ok();
        let bill: BillView = response.json();
        assert_eq!(bill.water_fee, dec!(100.00));
        assert_eq!(bill.elec_fee, dec!(50.00));
        assert_eq!(bill.total_amount, dec!(3150.00));

        let response = server
            .post("/api/bills/1/meter-reading")
            .add_header(role(), landlord())
            .json(&json!({ "current_water_reading": "110", "current_elec_reading": "450" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_reading_beyond_decimal_range_is_422() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());
        server
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(1, 1))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/bills/1/meter-reading")
            .add_header(role(), landlord())
            .json(&json!({
                "current_water_reading": "79228162514264337593543950335",
                "current_elec_reading": "400"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let bill: BillView = server
            .get("/api/bills/1")
            .add_header(role(), landlord())
            .await
            .json();
        assert_eq!(bill.total_amount, dec!(3000));
    }

    #[tokio::test]
    async fn test_bill_list_filters_by_status() {
        let store = populated_store();
        server_on(&store, TemporalFixtures::lease_start())
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(1, 1))
            .await
            .assert_status(StatusCode::CREATED);
        let server = server_on(&store, TemporalFixtures::day_after_first_due());

        let overdue: Vec<BillView> = server
            .get("/api/bills?status=overdue")
            .add_header(role(), landlord())
            .await
            .json();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].status_label, "Overdue");

        let pending: Vec<BillView> = server
            .get("/api/bills?status=pending&building_id=1")
            .add_header(role(), landlord())
            .await
            .json();
        assert!(pending.is_empty());

        server
            .get("/api/bills?status=late")
            .add_header(role(), landlord())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_terminate_lease_frees_room() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());
        server
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(1, 1))
            .await
            .assert_status(StatusCode::CREATED);

        let lease: LeaseView = server
            .post("/api/leases/1/terminate")
            .add_header(role(), landlord())
            .await
            .json();
        assert_eq!(lease.status_label, "Terminated");

        let building: BuildingView = server.get("/api/buildings/1").await.json();
        assert_eq!(building.vacant_rooms, 3);
    }
}

// ============================================================================
// Tenant routes
// ============================================================================

mod tenant_tests {
    use super::*;

    #[tokio::test]
    async fn test_my_routes_need_tenant_identity() {
        let server = server_on(&populated_store(), TemporalFixtures::lease_start());

        let response = server.get("/api/my/lease").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/my/bills")
            .add_header(tenant_id(), HeaderValue::from_static("not-a-number"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tenant_pays_own_bill() {
        let store = populated_store();
        server_on(&store, TemporalFixtures::lease_start())
            .post("/api/leases")
            .add_header(role(), landlord())
            .json(&lease_body(3, 2))
            .await
            .assert_status(StatusCode::CREATED);
        let server = server_on(&store, TemporalFixtures::day_after_first_due());

        let lease: LeaseView = server
            .get("/api/my/lease")
            .add_header(tenant_id(), HeaderValue::from_static("2"))
            .await
            .json();
        assert_eq!(lease.room_number, "A-103");

        let response = server
            .post("/api/my/bills/1/pay")
            .add_header(tenant_id(), HeaderValue::from_static("1"))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .post("/api/my/bills/1/pay")
            .add_header(tenant_id(), HeaderValue::from_static("2"))
            .await;
        response.assert_status_ok();
        let bill: BillView = response.json();
        assert_eq!(bill.status_label, "Paid");
        assert_eq!(bill.paid_on, Some(TemporalFixtures::day_after_first_due()));

        let response = server
            .post("/api/my/bills/1/pay")
            .add_header(tenant_id(), HeaderValue::from_static("2"))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }
}
