//! Core Kernel - Foundational types and utilities for the property management system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and currency rounding
//! - Calendar types: billing periods, date ranges and an injectable clock
//! - Strongly-typed entity identifiers
//! - Health-check ports shared by infrastructure adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{
    BillingPeriod, Clock, DateRange, FixedClock, SystemClock, TemporalError, Timezone,
};
pub use identifiers::{BuildingId, RoomId, TenantId, LeaseId, BillId};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
