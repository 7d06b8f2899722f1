//! Shared test support for the property management crates
//!
//! - `fixtures`: fixed rents, dates, rates and meter readings
//! - `builders`: rooms, tenants, lease terms and whole store states
//! - `assertions`: bill and room checks with readable failure messages
//! - `generators`: proptest strategies for readings, rents and terms

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
