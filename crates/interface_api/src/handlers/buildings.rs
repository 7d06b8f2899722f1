//! Building and room handlers

use axum::{extract::{Path, State}, http::StatusCode, Json};
use validator::Validate;

use app_services::{BuildingView, RoomView};
use core_kernel::{BuildingId, RoomId};
use crate::{AppState, error::ApiError, session::Caller};
use crate::dto::ApiJson;
use crate::dto::building::*;

/// Lists buildings with their rooms
pub async fn list_buildings(
    State(state): State<AppState>,
    Caller(session): Caller,
) -> Result<Json<Vec<BuildingView>>, ApiError> {
    Ok(Json(state.service.list_buildings(&session).await?))
}

pub async fn get_building(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(id): Path<BuildingId>,
) -> Result<Json<BuildingView>, ApiError> {
    Ok(Json(state.service.get_building(&session, id).await?))
}

pub async fn create_building(
    State(state): State<AppState>,
    Caller(session): Caller,
    ApiJson(request): ApiJson<CreateBuildingRequest>,
) -> Result<(StatusCode, Json<BuildingView>), ApiError> {
    request.validate()?;
    let building = state.service.create_building(&session, request.into()).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

/// Adds a room to a building
pub async fn create_room(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(building_id): Path<BuildingId>,
    ApiJson(request): ApiJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomView>), ApiError> {
    request.validate()?;
    let room = state
        .service
        .create_room(&session, building_id, request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// Moves a room in or out of maintenance
pub async fn update_room_status(
    State(state): State<AppState>,
    Caller(session): Caller,
    Path(room_id): Path<RoomId>,
    ApiJson(request): ApiJson<UpdateRoomStatusRequest>,
) -> Result<Json<RoomView>, ApiError> {
    let room = state
        .service
        .update_room_status(&session, room_id, request.status)
        .await?;
    Ok(Json(room))
}
