//! Application Services
//!
//! The operations a landlord or tenant can perform, each run as one store
//! transaction against an explicit [`Session`].
//!
//! # Access
//!
//! | Operation                              | Caller            |
//! |----------------------------------------|-------------------|
//! | list/get buildings and tenants         | anyone            |
//! | create buildings, rooms, tenants       | landlord          |
//! | leases, bills, meter readings          | landlord          |
//! | my lease, my bills, pay my bill        | tenant            |
//!
//! Landlord operations reject other sessions with `Forbidden`; tenant
//! operations without a tenant identity fail with `Unauthenticated`.
//!
//! # Expiry
//!
//! There is no scheduler. Before each operation the service terminates
//! active leases whose end date has passed, vacating their rooms.

pub mod session;
pub mod error;
pub mod commands;
pub mod views;
pub mod settings;
pub mod service;
pub mod seed;

pub use session::Session;
pub use error::ServiceError;
pub use commands::{BillFilter, NewBuilding, NewLease, NewRoom, NewTenant};
pub use views::{BillView, BuildingView, LeaseView, RoomView};
pub use settings::BillingSettings;
pub use service::PropertyService;
pub use seed::SeedSummary;
