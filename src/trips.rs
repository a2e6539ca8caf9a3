// standard library imports
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

// non-standard crate imports
use chrono::NaiveDateTime;

// imports of other modules from this crate
use super::geometry::GeoPoint;

// degenerate trips are floored at this mileage so downstream rate computations
// never divide by zero.
static MIN_TRIP_MILES: f64 = 0.1;

#[derive(PartialEq, Debug, Clone)]
pub struct Trip {
    pub id: String,
    pub requested_pickup_time: NaiveDateTime,
    pub scheduled_pickup_time: NaiveDateTime,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub distance_miles: f64,
    // historical duration; None if the record didn't have one.
    pub trip_duration_minutes: Option<f64>,
    pub num_passengers: u32,
    pub is_cancelled: bool,
}

// A convenience type for parsing csv data
type Row = HashMap<String, String>;

impl Trip {
    pub fn new(id: &str, requested_pickup_time: NaiveDateTime,
               scheduled_pickup_time: NaiveDateTime, pickup: GeoPoint, dropoff: GeoPoint,
               distance_miles: f64, trip_duration_minutes: Option<f64>, num_passengers: u32,
               is_cancelled: bool)
               -> Trip
    {
        Trip {
            id: String::from(id),
            requested_pickup_time,
            scheduled_pickup_time,
            pickup,
            dropoff,
            distance_miles,
            trip_duration_minutes,
            num_passengers,
            is_cancelled,
        }
    }

    /// Parse all trips from a csv file of scored trip records.  Unknown columns are
    /// ignored; a malformed timestamp or coordinate is an error, since the upstream
    /// cleaning stage guarantees those fields.
    pub fn all_from_csv(csvpath: &Path) -> Result<Vec<Trip>, Box<dyn Error>> {
        let file = File::open(csvpath)?;
        let mut reader = csv::Reader::from_reader(file);
        let mut trips = vec![];
        for result in reader.deserialize() {
            let row: Row = result?;

            // the duration column may be blank; every other field must be present.
            let duration = match row["trip_duration_minutes"].parse::<f64>() {
                Ok(minutes) => Some(minutes),
                Err(_) => None,
            };

            let trip = Trip::new(
                &row["trip_id"],
                parse_timestamp(&row["requested_pickup_time"])?,
                parse_timestamp(&row["scheduled_pickup_time"])?,
                GeoPoint::new(row["pickup_lat"].parse()?, row["pickup_lng"].parse()?),
                GeoPoint::new(row["dropoff_lat"].parse()?, row["dropoff_lng"].parse()?),
                row["distance_miles"].parse()?,
                duration,
                row["num_passengers"].parse()?,
                parse_flag(&row["is_cancelled"]),
            );
            trips.push(trip);
        }

        log::info!("parsed {} trips from {}", trips.len(), csvpath.display());
        Ok(trips)
    }

    /// The historical duration, or the given default when the record had none.
    pub fn duration_minutes_or(&self, default_minutes: f64) -> f64 {
        match self.trip_duration_minutes {
            Some(minutes) => minutes,
            None => default_minutes,
        }
    }

    /// Trip mileage with the degenerate-trip floor applied.
    pub fn floored_distance_miles(&self) -> f64 {
        self.distance_miles.max(MIN_TRIP_MILES)
    }
}

/// Collect references to the trips that actually ran.  Cancelled trips have no
/// execution to simulate, so everything downstream works on this subset.
pub fn active_trips(trips: &Vec<Trip>) -> Vec<&Trip> {
    trips.iter().filter(|tt| !tt.is_cancelled).collect()
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, Box<dyn Error>> {
    // the cleaning stage writes "2025-01-15 08:00:00", but accept the T-separated
    // form too since some exports use it.
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(ts) => Ok(ts),
        Err(_) => Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")?),
    }
}

fn parse_flag(raw: &str) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        _ => false,
    }
}
