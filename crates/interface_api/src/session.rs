//! Caller session from request headers
//!
//! `X-Role: landlord` makes the caller the landlord; `X-Tenant-Id: <id>`
//! makes them that tenant. A request with neither is anonymous.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use app_services::Session;
use core_kernel::TenantId;
use crate::error::ApiError;

pub const ROLE_HEADER: &str = "x-role";
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Extractor for the caller's [`Session`]
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Session);

/// Reads the session from `headers`
///
/// # Errors
///
/// Returns `BadRequest` if the tenant header is not an id.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, ApiError> {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_ascii_lowercase());
    if role.as_deref() == Some("landlord") {
        return Ok(Session::Landlord);
    }

    match headers.get(TENANT_HEADER) {
        Some(value) => {
            let id = value
                .to_str()
                .ok()
                .and_then(|raw| raw.parse::<TenantId>().ok())
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid {} header", TENANT_HEADER)))?;
            Ok(Session::Tenant(id))
        }
        None => Ok(Session::Anonymous),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers).map(Caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_sessions_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_from_headers(&headers).unwrap(), Session::Anonymous);

        headers.insert(TENANT_HEADER, HeaderValue::from_static("2"));
        assert_eq!(session_from_headers(&headers).unwrap(), Session::Tenant(TenantId::new(2)));

        headers.insert(ROLE_HEADER, HeaderValue::from_static("Landlord"));
        assert_eq!(session_from_headers(&headers).unwrap(), Session::Landlord);
    }

    #[test]
    fn test_malformed_tenant_id() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_static("abc"));
        assert!(matches!(session_from_headers(&headers), Err(ApiError::BadRequest(_))));
    }
}
