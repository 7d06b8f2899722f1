//! Leasing domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{BillingPeriod, LeaseId, RoomId, TenantId};
use domain_billing::BillingError;
use domain_property::{PropertyError, RoomStatus};
use crate::lease::LeaseStatus;

/// Errors that can occur in the leasing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaseError {
    /// Signing against a room that is not vacant
    #[error("Room {room_id} is not available for lease (status: {status})")]
    RoomUnavailable { room_id: RoomId, status: RoomStatus },

    /// Tenant already holds an active lease
    #[error("Tenant {tenant_id} already has an active lease ({lease_id})")]
    DuplicateActiveLease { tenant_id: TenantId, lease_id: LeaseId },

    #[error("Invalid lease transition for {lease_id}: {from} -> {to}")]
    InvalidTransition {
        lease_id: LeaseId,
        from: LeaseStatus,
        to: LeaseStatus,
    },

    #[error("Lease {lease_id} is not active (status: {status})")]
    LeaseNotActive { lease_id: LeaseId, status: LeaseStatus },

    /// Next billing period starts after the lease ends
    #[error("Billing period {period} is outside lease {lease_id}, which ends {end_date}")]
    PeriodOutsideTerm {
        lease_id: LeaseId,
        period: BillingPeriod,
        end_date: NaiveDate,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl LeaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeaseError::Validation(message.into())
    }
}
