//! Tenant self-service handlers

use axum::{extract::{Path, State}, Json};

use app_services::{BillView, LeaseView};
use core_kernel::BillId;
use crate::{AppState, error::ApiError, session::Caller};

pub async fn get_my_lease(
    State(state): State<AppState>,
    Caller(session): Caller,
) -> Result<Json<LeaseView>, ApiError> {
    Ok(Json(state.service.get_my_lease(&session).await?))
}

pub async fn get_my_bills(
    State(state): State<AppState>,
    Caller(session): Caller,
) -> Result<Json<Vec<BillView>>, ApiError> {
    Ok(Json(state.service.get_my_bills(&session).await?))
}

pub async fn pay_my_bill(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<BillId>,
) -> Result<Json<BillView>, ApiError> {
    Ok(Json(state.service.pay_my_bill(&session, id).await?))
}
