//! Transactional access to the entity graph

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
use crate::state::PropertyState;

/// Shared handle to the in-memory entity graph
///
/// Cloning the handle shares the same graph.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    state: Arc<RwLock<PropertyState>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store around an existing graph
    pub fn with_state(state: PropertyState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Runs `f` against a consistent snapshot
    pub async fn read<T>(&self, f: impl FnOnce(&PropertyState) -> T) -> T {
        let state = self.state.read().await;
        f(&state)
    }

    /// Runs `f` as one atomic write
    ///
    /// `f` works on a copy of the graph. The copy replaces the graph only
    /// if `f` returns `Ok`; on `Err` nothing `f` did is kept.
    pub async fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut PropertyState) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut state = self.state.write().await;
        let mut working = state.clone();
        match f(&mut working) {
            Ok(value) => {
                *state = working;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(e) => {
                debug!("Transaction rolled back");
                Err(e)
            }
        }
    }
}

impl DomainPort for PropertyStore {}

#[async_trait]
impl HealthCheckable for PropertyStore {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let (buildings, rooms, tenants, leases) = self.read(|state| state.counts()).await;

        HealthCheckResult {
            adapter_id: "in-memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: started.elapsed().as_millis() as u64,
            message: Some(format!(
                "{} buildings, {} rooms, {} tenants, {} leases",
                buildings, rooms, tenants, leases
            )),
            checked_at: Utc::now(),
        }
    }
}
