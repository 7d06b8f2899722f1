//! Bill handlers

use axum::{extract::{Path, Query, State}, Json};
use validator::Validate;

use app_services::BillView;
use core_kernel::BillId;
use crate::{AppState, error::ApiError, session::Caller};
use crate::dto::ApiJson;
use crate::dto::bill::{BillQuery, MeterReadingRequest};

/// Lists bills, optionally by status and building
pub async fn list_bills(
    State(state): State<AppState>,
    Caller(session): Caller,
    Query(query): Query<BillQuery>,
) -> Result<Json<Vec<BillView>>, ApiError> {
    let filter = query.try_into()?;
    Ok(Json(state.service.list_bills(&session, filter).await?))
}

pub async fn get_bill(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<BillId>,
) -> Result<Json<BillView>, ApiError> {
    Ok(Json(state.service.get_bill(&session, id).await?))
}

/// Records closing meter values and reprices the bill
pub async fn submit_meter_reading(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<BillId>,
    ApiJson(request): ApiJson<MeterReadingRequest>,
) -> Result<Json<BillView>, ApiError> {
    request.validate()?;
    let bill = state
        .service
        .submit_meter_reading(
            &session,
            id,
            request.current_water_reading,
            request.current_elec_reading,
        )
        .await?;
    Ok(Json(bill))
}
