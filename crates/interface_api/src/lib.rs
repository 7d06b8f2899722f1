//! HTTP API Layer
//!
//! This crate exposes the property management service over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per resource
//! - **Session**: Caller identity from the `X-Role` / `X-Tenant-Id` headers
//! - **Middleware**: Tracing, request ids and audit logging
//! - **DTOs**: Request bodies with validation
//! - **Error Handling**: Consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use app_services::PropertyService;
use crate::config::ApiConfig;
use crate::handlers::{bills, buildings, health, leases, my, tenants};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PropertyService,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - The property management service
/// * `config` - API configuration
pub fn create_router(service: PropertyService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let building_routes = Router::new()
        .route("/", get(buildings::list_buildings).post(buildings::create_building))
        .route("/:id", get(buildings::get_building))
        .route("/:id/rooms", post(buildings::create_room));

    let room_routes = Router::new()
        .route("/:id/status", put(buildings::update_room_status));

    let tenant_routes = Router::new()
        .route("/", get(tenants::list_tenants).post(tenants::create_tenant))
        .route("/:id", get(tenants::get_tenant));

    let lease_routes = Router::new()
        .route("/", get(leases::list_leases).post(leases::create_lease))
        .route("/:id", get(leases::get_lease))
        .route("/:id/terminate", post(leases::terminate_lease))
        .route("/:id/bills", post(leases::issue_next_bill));

    let bill_routes = Router::new()
        .route("/", get(bills::list_bills))
        .route("/:id", get(bills::get_bill))
        .route("/:id/meter-reading", post(bills::submit_meter_reading));

    let my_routes = Router::new()
        .route("/lease", get(my::get_my_lease))
        .route("/bills", get(my::get_my_bills))
        .route("/bills/:id/pay", post(my::pay_my_bill));

    let api_routes = Router::new()
        .nest("/buildings", building_routes)
        .nest("/rooms", room_routes)
        .nest("/tenants", tenant_routes)
        .nest("/leases", lease_routes)
        .nest("/bills", bill_routes)
        .nest("/my", my_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
