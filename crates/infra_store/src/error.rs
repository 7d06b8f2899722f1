//! Store errors

use thiserror::Error;

use domain_property::PropertyError;

/// Errors raised while looking up or linking entities in the store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
