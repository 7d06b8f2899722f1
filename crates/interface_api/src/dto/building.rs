//! Building and room DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use app_services::{NewBuilding, NewRoom};
use domain_property::RoomStatus;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBuildingRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub address: String,
}

impl From<CreateBuildingRequest> for NewBuilding {
    fn from(request: CreateBuildingRequest) -> Self {
        NewBuilding {
            name: request.name,
            address: request.address,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
    #[validate(custom(function = "super::positive"))]
    pub area: Decimal,
    #[validate(custom(function = "super::non_negative"))]
    #[serde(default)]
    pub water_reading: Decimal,
    #[validate(custom(function = "super::non_negative"))]
    #[serde(default)]
    pub elec_reading: Decimal,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(request: CreateRoomRequest) -> Self {
        NewRoom {
            room_number: request.room_number,
            area: request.area,
            water_reading: request.water_reading,
            elec_reading: request.elec_reading,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomStatusRequest {
    pub status: RoomStatus,
}
