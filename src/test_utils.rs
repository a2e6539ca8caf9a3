use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::fleet::DriverPool;
use super::geometry::GeoPoint;
use super::trips::Trip;


/// A timestamp on the fixture day (2025-01-15).
pub fn test_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

/// Five trips spread over one morning, matching the shape of the historical
/// scored-trip data.
pub fn make_sample_trips() -> Vec<Trip> {
    let distances = [5.0, 6.0, 7.0, 8.0, 5.0];
    let durations = [20.0, 25.0, 30.0, 35.0, 20.0];
    let passengers = [1, 2, 3, 1, 2];

    (0..5).map(|ii| {
        let offset = ii as u32 * 15;
        Trip::new(
            &format!("T{:03}", ii + 1),
            test_time(8, 0) + chrono::Duration::minutes(offset as i64),
            test_time(8, 5) + chrono::Duration::minutes(offset as i64),
            GeoPoint::new(33.4 + 0.05 * ii as f64, -112.0 - 0.05 * ii as f64),
            GeoPoint::new(33.42 + 0.05 * ii as f64, -112.02 - 0.05 * ii as f64),
            distances[ii],
            Some(durations[ii]),
            passengers[ii],
            false,
        )
    }).collect()
}

/// Three drivers with spread-out start locations and small/medium/large vehicles.
pub fn make_test_pool() -> DriverPool {
    let ids: Vec<String> = (1..=3).map(|ii| format!("DRV_{:04}", ii)).collect();

    let mut start_locations = HashMap::new();
    let mut capacities = HashMap::new();
    for (ii, id) in ids.iter().enumerate() {
        let loc = GeoPoint::new(33.4 + 0.1 * ii as f64, -112.0 - 0.1 * ii as f64);
        start_locations.insert(id.clone(), loc);
        capacities.insert(id.clone(), 2 * (ii as u32 + 1));
    }

    DriverPool::from_attributes(ids, start_locations, capacities)
}
