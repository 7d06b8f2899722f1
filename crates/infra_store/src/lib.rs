//! Infrastructure - In-Memory Store
//!
//! Holds the whole entity graph (buildings with their rooms, tenants, and
//! leases with their bills) behind one async lock.
//!
//! # Transactions
//!
//! A write transaction clones the graph, runs the operation against the
//! clone and swaps it in only if the operation returns `Ok`. Writers are
//! serialized by the lock, and readers never observe a half-applied
//! operation.
//!
//! ```rust,ignore
//! let lease = store
//!     .transaction(|state| {
//!         let room = state.room_mut(room_id)?;
//!         lifecycle.sign(lease_id, bill_id, &terms, room, None, baseline)
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use state::PropertyState;
pub use store::PropertyStore;
