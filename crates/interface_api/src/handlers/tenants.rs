//! Tenant handlers

use axum::{extract::{Path, State}, http::StatusCode, Json};
use validator::Validate;

use core_kernel::TenantId;
use domain_property::Tenant;
use crate::{AppState, error::ApiError, session::Caller};
use crate::dto::ApiJson;
use crate::dto::tenant::CreateTenantRequest;

pub async fn list_tenants(
    State(state): State<AppState>,
    Caller(session): Caller,
) -> Result<Json<Vec<Tenant>>, ApiError> {
    Ok(Json(state.service.list_tenants(&session).await?))
}

pub async fn get_tenant(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<TenantId>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(state.service.get_tenant(&session, id).await?))
}

pub async fn create_tenant(
    State(state): State<AppState>,
    Caller(session): Caller,
    ApiJson(request): ApiJson<CreateTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    request.validate()?;
    let tenant = state.service.create_tenant(&session, request.into()).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}
