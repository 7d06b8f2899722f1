//! Ports shared by infrastructure adapters
//!
//! Storage adapters implement these traits so that the HTTP layer can
//! report readiness without knowing which adapter is behind the service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is fully operational
    Healthy,
    /// Adapter works but something is off
    Degraded,
    /// Adapter cannot serve requests
    Unhealthy,
}

/// Result of a single health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Identifier of the adapter that was checked
    pub adapter_id: String,
    /// Observed health
    pub status: AdapterHealth,
    /// Time taken by the check
    pub latency_ms: u64,
    /// Optional detail
    pub message: Option<String>,
    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Returns true if the adapter can serve requests
    pub fn is_available(&self) -> bool {
        !matches!(self.status, AdapterHealth::Unhealthy)
    }
}

/// Adapters that can report their own health
#[async_trait]
pub trait HealthCheckable: DomainPort {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysUp;

    impl DomainPort for AlwaysUp {}

    #[async_trait]
    impl HealthCheckable for AlwaysUp {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "always-up".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[tokio::test]
    async fn test_degraded_adapter_is_still_available() {
        let result = AlwaysUp.health_check().await;
        assert!(result.is_available());
    }

    #[test]
    fn test_health_serializes_snake_case() {
        let json = serde_json::to_string(&AdapterHealth::Unhealthy).unwrap();
        assert_eq!(json, "\"unhealthy\"");
    }
}
