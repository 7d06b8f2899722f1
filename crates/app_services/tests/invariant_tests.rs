//! Property tests over the service
//!
//! Each case signs a lease through the state builder, then drives meter
//! readings through the service and inspects the stored bill and room.

use std::sync::Arc;

use proptest::prelude::*;

use app_services::{BillingSettings, PropertyService, Session};
use core_kernel::{BillId, FixedClock, LeaseId, Money, RoomId};
use domain_billing::{BillStatus, UtilityRates};
use domain_property::{MeterReadings, RoomStatus};
use infra_store::PropertyStore;
use test_utils::{
    assert_bill_status, assert_readings_monotonic, assert_room_status, assert_total_is_sum,
    lease_term_strategy, rates_strategy, reading_sequence_strategy, rent_strategy,
    TestLeaseTermsBuilder, TestStateBuilder,
};

fn run_readings(
    rates: UtilityRates,
    (start, end): (chrono::NaiveDate, chrono::NaiveDate),
    rent: Money,
    readings: Vec<MeterReadings>,
) {
    let state = TestStateBuilder::new()
        .with_room("A-101", MeterReadings::zero())
        .with_tenant("User1")
        .with_lease(TestLeaseTermsBuilder::new().with_term(start, end).with_rent(rent).build())
        .build();
    let store = PropertyStore::with_state(state);
    let settings = BillingSettings { rates, ..BillingSettings::default() };
    let service = PropertyService::new(store.clone(), Arc::new(FixedClock(start)), settings);

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    runtime.block_on(async {
        let mut seen = vec![MeterReadings::zero()];
        for current in readings {
            service
                .submit_meter_reading(&Session::Landlord, BillId::new(1), current.water, current.elec)
                .await
                .unwrap();

            store
                .read(|state| {
                    let (lease, bill) = state.bill(BillId::new(1)).unwrap();
                    assert_eq!(lease.id, LeaseId::new(1));
                    assert_total_is_sum(bill);
                    assert_bill_status(bill, start, BillStatus::Pending);
                    assert_eq!(bill.rent_fee(), rent.round_half_up());

                    let room = state.room(RoomId::new(1)).unwrap();
                    assert_room_status(room, RoomStatus::Occupied);
                    seen.push(room.last_readings());
                })
                .await;
        }
        assert_readings_monotonic(&seen);
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bill_total_tracks_readings(
        rates in rates_strategy(),
        term in lease_term_strategy(),
        rent in rent_strategy(),
        readings in reading_sequence_strategy(4),
    ) {
        run_readings(rates, term, rent, readings);
    }
}
