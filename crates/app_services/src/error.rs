//! Service errors

use thiserror::Error;

use domain_billing::BillingError;
use domain_leasing::LeaseError;
use domain_property::PropertyError;
use infra_store::StoreError;

/// Errors returned by service operations
///
/// Domain errors are flattened so that, for example, an invalid meter
/// reading surfaces as `Billing` whether it came from signing a lease or
/// from a reading on an existing bill.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Tenant identity required")]
    Unauthenticated,

    #[error("Forbidden: landlord access required for {operation}")]
    Forbidden { operation: &'static str },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Lease(LeaseError),

    #[error(transparent)]
    Billing(BillingError),

    #[error(transparent)]
    Property(PropertyError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }
}

impl From<LeaseError> for ServiceError {
    fn from(err: LeaseError) -> Self {
        match err {
            LeaseError::Billing(e) => e.into(),
            LeaseError::Property(e) => e.into(),
            LeaseError::Validation(message) => ServiceError::Validation(message),
            other => ServiceError::Lease(other),
        }
    }
}

impl From<BillingError> for ServiceError {
    fn from(err: BillingError) -> Self {
        ServiceError::Billing(err)
    }
}

impl From<PropertyError> for ServiceError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::InvalidField { field, message } => {
                ServiceError::Validation(format!("{}: {}", field, message))
            }
            other => ServiceError::Property(other),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            StoreError::Property(e) => e.into(),
        }
    }
}
