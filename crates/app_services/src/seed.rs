//! Demo data
//!
//! Two buildings with three rooms each, three tenants, and one active
//! twelve-month lease for the first tenant on A-102 starting this month.

use chrono::{Datelike, Months};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use domain_property::MeterReadings;

use crate::commands::{NewBuilding, NewLease, NewRoom, NewTenant};
use crate::error::ServiceError;
use crate::service::PropertyService;
use crate::session::Session;

/// What seeding created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub buildings: usize,
    pub rooms: usize,
    pub tenants: usize,
    pub leases: usize,
}

impl PropertyService {
    /// Loads the demo data into an empty store
    ///
    /// Returns `None` without changing anything if the store already holds
    /// buildings.
    pub async fn seed_demo_data(&self, session: &Session) -> Result<Option<SeedSummary>, ServiceError> {
        session.require_landlord("seed_demo_data")?;
        let populated = self.store().read(|state| state.buildings().next().is_some()).await;
        if populated {
            info!("Store already populated; skipping demo data");
            return Ok(None);
        }

        let mut summary = SeedSummary::default();
        let buildings = [
            ("Building A", "123 Main Street", [
                ("A-101", dec!(50), MeterReadings::new(dec!(100), dec!(200))),
                ("A-102", dec!(60), MeterReadings::new(dec!(150), dec!(250))),
                ("A-103", dec!(55), MeterReadings::new(dec!(120), dec!(220))),
            ]),
            ("Building B", "456 Oak Avenue", [
                ("B-201", dec!(70), MeterReadings::new(dec!(90), dec!(180))),
                ("B-202", dec!(65), MeterReadings::new(dec!(110), dec!(210))),
                ("B-203", dec!(58), MeterReadings::new(dec!(130), dec!(230))),
            ]),
        ];

        let mut leased_room = None;
        for (name, address, rooms) in buildings {
            let building = self
                .create_building(session, NewBuilding { name: name.into(), address: address.into() })
                .await?;
            summary.buildings += 1;
            for (number, area, readings) in rooms {
                let room = self.create_room(session, building.id, new_room(number, area, readings)).await?;
                summary.rooms += 1;
                if number == "A-102" {
                    leased_room = Some(room.id);
                }
            }
        }

        let mut first_tenant = None;
        for n in 1..=3 {
            let tenant = self
                .create_tenant(
                    session,
                    NewTenant {
                        name: format!("User{}", n),
                        phone: format!("1380013800{}", n),
                    },
                )
                .await?;
            summary.tenants += 1;
            first_tenant.get_or_insert(tenant.id);
        }

        if let (Some(room_id), Some(tenant_id)) = (leased_room, first_tenant) {
            let today = self.today();
            let start_date = today.with_day(1).unwrap_or(today);
            let end_date = start_date
                .checked_add_months(Months::new(12))
                .and_then(|d| d.pred_opt())
                .unwrap_or(start_date);
            self.create_lease(
                session,
                NewLease {
                    room_id,
                    tenant_id,
                    start_date,
                    end_date,
                    rent_amount: dec!(3000),
                    deposit: dec!(6000),
                    baseline: None,
                },
            )
            .await?;
            summary.leases += 1;
        }

        info!(
            buildings = summary.buildings,
            rooms = summary.rooms,
            tenants = summary.tenants,
            leases = summary.leases,
            "Demo data loaded"
        );
        Ok(Some(summary))
    }
}

fn new_room(number: &str, area: Decimal, readings: MeterReadings) -> NewRoom {
    NewRoom {
        room_number: number.to_string(),
        area,
        water_reading: readings.water,
        elec_reading: readings.elec,
    }
}
