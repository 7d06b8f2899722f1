//! Request handlers

pub mod health;
pub mod buildings;
pub mod tenants;
pub mod leases;
pub mod bills;
pub mod my;
