//! Property Domain
//!
//! This crate models the physical side of the rental business: buildings,
//! the rooms inside them, the utility meters attached to each room, and the
//! tenants who rent them.
//!
//! # Room Status
//!
//! ```text
//! Vacant <-> Maintenance        (set by the landlord)
//! Vacant  -> Occupied           (lease signed)
//! Occupied -> Vacant            (lease terminated or expired)
//! ```
//!
//! Meter readings on a room are cumulative counters and never decrease.

pub mod building;
pub mod room;
pub mod tenant;
pub mod error;

pub use building::Building;
pub use room::{MeterReadings, Room, RoomStatus};
pub use tenant::Tenant;
pub use error::PropertyError;
