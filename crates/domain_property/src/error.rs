//! Property domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{BuildingId, RoomId};
use crate::room::RoomStatus;

/// Errors that can occur in the property domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Room number {room_number} already exists in building {building_id}")]
    DuplicateRoomNumber {
        building_id: BuildingId,
        room_number: String,
    },

    #[error("Room {room_id} belongs to building {actual}, not {expected}")]
    WrongBuilding {
        room_id: RoomId,
        expected: BuildingId,
        actual: BuildingId,
    },

    #[error("Room {room_id} is {status}, not vacant")]
    RoomNotVacant {
        room_id: RoomId,
        status: RoomStatus,
    },

    #[error("Room {room_id} is {status}, not occupied")]
    RoomNotOccupied {
        room_id: RoomId,
        status: RoomStatus,
    },

    #[error("Cannot change room {room_id} from {from} to {to} manually")]
    InvalidStatusChange {
        room_id: RoomId,
        from: RoomStatus,
        to: RoomStatus,
    },

    #[error("{meter} reading for room {room_id} cannot go from {previous} back to {current}")]
    MeterRegression {
        room_id: RoomId,
        meter: &'static str,
        previous: Decimal,
        current: Decimal,
    },

    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl PropertyError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PropertyError::InvalidField {
            field,
            message: message.into(),
        }
    }
}
