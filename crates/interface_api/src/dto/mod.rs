//! Request bodies and query strings

pub mod building;
pub mod tenant;
pub mod lease;
pub mod bill;

use axum::extract::FromRequest;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::error::ApiError;

/// JSON body whose rejection is reported as an [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

pub(crate) fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}
