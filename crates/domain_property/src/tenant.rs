//! Tenants

use serde::{Deserialize, Serialize};

use core_kernel::TenantId;
use crate::error::PropertyError;

/// A person renting, or eligible to rent, a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub phone: String,
}

impl Tenant {
    pub fn new(
        id: TenantId,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, PropertyError> {
        let name = name.into().trim().to_string();
        let phone = phone.into().trim().to_string();
        if name.is_empty() {
            return Err(PropertyError::invalid("name", "must not be blank"));
        }
        if phone.is_empty() {
            return Err(PropertyError::invalid("phone", "must not be blank"));
        }
        if !phone.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ')) {
            return Err(PropertyError::invalid("phone", format!("unexpected characters in {}", phone)));
        }

        Ok(Self { id, name, phone })
    }
}
