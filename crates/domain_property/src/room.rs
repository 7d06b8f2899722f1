//! Rooms and their utility meters

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use core_kernel::{BuildingId, RoomId};
use crate::error::PropertyError;

/// Occupancy status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Available to lease
    Vacant,
    /// Held by an active lease
    Occupied,
    /// Withdrawn from the market by the landlord
    Maintenance,
}

impl RoomStatus {
    /// Display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Vacant => "Vacant",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Under maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RoomStatus::Vacant => "Vacant",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Maintenance",
        };
        f.write_str(tag)
    }
}

/// Cumulative water and electricity counter values taken together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeterReadings {
    /// Water meter (cubic metres)
    pub water: Decimal,
    /// Electricity meter (kWh)
    pub elec: Decimal,
}

impl MeterReadings {
    pub fn new(water: Decimal, elec: Decimal) -> Self {
        Self { water, elec }
    }

    /// Both counters at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if neither counter is below the other snapshot's value
    pub fn dominates(&self, earlier: &MeterReadings) -> bool {
        self.water >= earlier.water && self.elec >= earlier.elec
    }
}

/// A rentable room inside a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Owning building
    pub building_id: BuildingId,
    /// Room number, unique within the building
    pub room_number: String,
    /// Floor area in square metres
    pub area: Decimal,
    status: RoomStatus,
    last_readings: MeterReadings,
}

impl Room {
    /// Creates a vacant room
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` if the room number is blank, the area is not
    /// positive or an initial meter reading is negative.
    pub fn new(
        id: RoomId,
        building_id: BuildingId,
        room_number: impl Into<String>,
        area: Decimal,
        initial_readings: MeterReadings,
    ) -> Result<Self, PropertyError> {
        let room_number = room_number.into().trim().to_string();
        if room_number.is_empty() {
            return Err(PropertyError::invalid("room_number", "must not be blank"));
        }
        if area <= Decimal::ZERO {
            return Err(PropertyError::invalid("area", format!("must be positive, got {}", area)));
        }
        if initial_readings.water.is_sign_negative() || initial_readings.elec.is_sign_negative() {
            return Err(PropertyError::invalid("meter reading", "must not be negative"));
        }

        Ok(Self {
            id,
            building_id,
            room_number,
            area,
            status: RoomStatus::Vacant,
            last_readings: initial_readings,
        })
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// The readings carried forward to the next billing cycle
    pub fn last_readings(&self) -> MeterReadings {
        self.last_readings
    }

    pub fn last_water_reading(&self) -> Decimal {
        self.last_readings.water
    }

    pub fn last_elec_reading(&self) -> Decimal {
        self.last_readings.elec
    }

    pub fn is_vacant(&self) -> bool {
        self.status == RoomStatus::Vacant
    }

    /// Marks the room as taken by a newly signed lease
    pub fn occupy(&mut self) -> Result<(), PropertyError> {
        if self.status != RoomStatus::Vacant {
            return Err(PropertyError::RoomNotVacant {
                room_id: self.id,
                status: self.status,
            });
        }
        self.status = RoomStatus::Occupied;
        info!(room_id = %self.id, "Room occupied");
        Ok(())
    }

    /// Releases the room when its lease ends
    pub fn vacate(&mut self) -> Result<(), PropertyError> {
        if self.status != RoomStatus::Occupied {
            return Err(PropertyError::RoomNotOccupied {
                room_id: self.id,
                status: self.status,
            });
        }
        self.status = RoomStatus::Vacant;
        info!(room_id = %self.id, "Room vacated");
        Ok(())
    }

    /// Applies a landlord's manual status change
    ///
    /// Only Vacant and Maintenance can be swapped by hand; occupancy is
    /// owned by the lease lifecycle.
    pub fn set_status(&mut self, target: RoomStatus) -> Result<(), PropertyError> {
        use RoomStatus::*;
        match (self.status, target) {
            (Vacant, Vacant) | (Maintenance, Maintenance) => Ok(()),
            (Vacant, Maintenance) | (Maintenance, Vacant) => {
                info!(room_id = %self.id, from = %self.status, to = %target, "Room status changed");
                self.status = target;
                Ok(())
            }
            (from, to) => Err(PropertyError::InvalidStatusChange {
                room_id: self.id,
                from,
                to,
            }),
        }
    }

    /// Records new cumulative meter readings
    ///
    /// # Errors
    ///
    /// Returns `MeterRegression` if either counter would go backwards.
    pub fn record_readings(&mut self, readings: MeterReadings) -> Result<(), PropertyError> {
        if readings.water < self.last_readings.water {
            return Err(PropertyError::MeterRegression {
                room_id: self.id,
                meter: "water",
                previous: self.last_readings.water,
                current: readings.water,
            });
        }
        if readings.elec < self.last_readings.elec {
            return Err(PropertyError::MeterRegression {
                room_id: self.id,
                meter: "electricity",
                previous: self.last_readings.elec,
                current: readings.elec,
            });
        }
        self.last_readings = readings;
        Ok(())
    }
}
