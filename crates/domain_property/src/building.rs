//! Buildings and the rooms they contain

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{BuildingId, RoomId};
use crate::error::PropertyError;
use crate::room::Room;

/// A building owning an ordered collection of rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Unique identifier
    pub id: BuildingId,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    rooms: Vec<Room>,
}

impl Building {
    /// Creates a building with no rooms
    pub fn new(
        id: BuildingId,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, PropertyError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PropertyError::invalid("name", "must not be blank"));
        }

        Ok(Self {
            id,
            name,
            address: address.into().trim().to_string(),
            rooms: Vec::new(),
        })
    }

    /// Rooms in the order they were added
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Adds a room to this building
    ///
    /// # Errors
    ///
    /// - `WrongBuilding` if the room was created for another building
    /// - `DuplicateRoomNumber` if the number is already used here
    pub fn add_room(&mut self, room: Room) -> Result<(), PropertyError> {
        if room.building_id != self.id {
            return Err(PropertyError::WrongBuilding {
                room_id: room.id,
                expected: self.id,
                actual: room.building_id,
            });
        }
        if self
            .rooms
            .iter()
            .any(|r| r.room_number.eq_ignore_ascii_case(&room.room_number))
        {
            return Err(PropertyError::DuplicateRoomNumber {
                building_id: self.id,
                room_number: room.room_number,
            });
        }

        info!(building_id = %self.id, room_id = %room.id, room_number = %room.room_number, "Room added");
        self.rooms.push(room);
        Ok(())
    }

    /// Number of rooms currently available to lease
    pub fn vacant_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_vacant()).count()
    }
}
