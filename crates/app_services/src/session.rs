//! Caller identity

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use core_kernel::TenantId;
use crate::error::ServiceError;

/// Who is calling
///
/// Passed to every service operation; nothing about the caller is kept
/// between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "role", content = "tenant_id", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Landlord,
    Tenant(TenantId),
}

impl Session {
    pub fn is_landlord(&self) -> bool {
        matches!(self, Session::Landlord)
    }

    /// # Errors
    ///
    /// Returns `Forbidden` for any session other than the landlord's.
    pub fn require_landlord(&self, operation: &'static str) -> Result<(), ServiceError> {
        if self.is_landlord() {
            return Ok(());
        }
        warn!(session = %self, operation, "Landlord access denied");
        Err(ServiceError::Forbidden { operation })
    }

    /// # Errors
    ///
    /// Returns `Unauthenticated` unless the session carries a tenant id.
    pub fn require_tenant(&self) -> Result<TenantId, ServiceError> {
        match self {
            Session::Tenant(id) => Ok(*id),
            _ => Err(ServiceError::Unauthenticated),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Anonymous => f.write_str("anonymous"),
            Session::Landlord => f.write_str("landlord"),
            Session::Tenant(id) => write!(f, "tenant {}", id),
        }
    }
}
