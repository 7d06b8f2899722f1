//! Lease handlers

use axum::{extract::{Path, State}, http::StatusCode, Json};
use validator::Validate;

use app_services::{BillView, LeaseView};
use core_kernel::LeaseId;
use crate::{AppState, error::ApiError, session::Caller};
use crate::dto::ApiJson;
use crate::dto::lease::CreateLeaseRequest;

/// Lists all leases with their bills
pub async fn list_leases(
    State(state): State<AppState>,
    Caller(session): Caller,
) -> Result<Json<Vec<LeaseView>>, ApiError> {
    Ok(Json(state.service.list_leases(&session).await?))
}

pub async fn get_lease(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<LeaseId>,
) -> Result<Json<LeaseView>, ApiError> {
    Ok(Json(state.service.get_lease(&session, id).await?))
}

/// Signs a lease and issues its first bill
pub async fn create_lease(
    State(state): State<AppState>,
    Caller(session): Caller,
    ApiJson(request): ApiJson<CreateLeaseRequest>,
) -> Result<(StatusCode, Json<LeaseView>), ApiError> {
    request.validate()?;
    let lease = state.service.create_lease(&session, request.into()).await?;
    Ok((StatusCode::CREATED, Json(lease)))
}

pub async fn terminate_lease(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<LeaseId>,
) -> Result<Json<LeaseView>, ApiError> {
    Ok(Json(state.service.terminate_lease(&session, id).await?))
}

/// Issues the lease's next monthly bill
pub async fn issue_next_bill(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<LeaseId>,
) -> Result<(StatusCode, Json<BillView>), ApiError> {
    let bill = state.service.issue_next_bill(&session, id).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}
