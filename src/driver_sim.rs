// standard library imports
use std::cmp::max;
use std::collections::HashMap;

// non-standard crate imports
use chrono::{Duration, NaiveDateTime};
use rand_distr::{Distribution, Normal};
use rand_isaac::Isaac64Rng;

// imports of other modules from this crate
use super::assignment::AssignmentTable;
use super::config_utils::{minutes_between, minutes_to_duration};
use super::fleet::DriverPool;
use super::geometry::GeoPoint;
use super::sim_config::SimConfig;
use super::trips::Trip;

// spread of the multiplicative noise on deadhead travel and on trip execution.
static DEADHEAD_NOISE_STDEV: f64 = 0.1;
static EXECUTION_NOISE_STDEV: f64 = 0.05;

/// Aggregated metrics from replaying one strategy's assignments.
#[derive(PartialEq, Debug, Clone)]
pub struct SimulationResult {
    pub strategy_name: String,
    pub total_trips: usize,
    // fraction of trips picked up within the on-time threshold
    pub on_time_rate: f64,
    // trip miles plus deadhead miles
    pub total_miles: f64,
    pub avg_trip_duration: f64,
    pub avg_idle_time: f64,
    // mean passengers-to-seats ratio
    pub utilization_rate: f64,
}

impl SimulationResult {
    fn empty(strategy_name: &str) -> SimulationResult {
        SimulationResult {
            strategy_name: String::from(strategy_name),
            total_trips: 0,
            on_time_rate: 0.0,
            total_miles: 0.0,
            avg_trip_duration: 0.0,
            avg_idle_time: 0.0,
            utilization_rate: 0.0,
        }
    }

    /// The reporting-layer view of this result: rates scaled to percentages and
    /// everything rounded to two decimals.
    pub fn to_summary(&self) -> SummaryRow {
        SummaryRow {
            strategy: self.strategy_name.clone(),
            total_trips: self.total_trips,
            on_time_rate: round2(self.on_time_rate * 100.0),
            total_miles: round2(self.total_miles),
            avg_trip_duration: round2(self.avg_trip_duration),
            avg_idle_time: round2(self.avg_idle_time),
            utilization_rate: round2(self.utilization_rate * 100.0),
        }
    }
}

/// One row of the comparison table consumed by the reporting layer.  The column
/// set is a stable contract across runs.
#[derive(PartialEq, Debug, Clone)]
pub struct SummaryRow {
    pub strategy: String,
    pub total_trips: usize,
    pub on_time_rate: f64,
    pub total_miles: f64,
    pub avg_trip_duration: f64,
    pub avg_idle_time: f64,
    pub utilization_rate: f64,
}

impl SummaryRow {
    pub fn csv_header() -> [&'static str; 7] {
        ["strategy", "total_trips", "on_time_rate", "total_miles", "avg_trip_duration",
         "avg_idle_time", "utilization_rate"]
    }

    pub fn csv_record(&self) -> [String; 7] {
        [
            self.strategy.clone(),
            self.total_trips.to_string(),
            format!("{:.2}", self.on_time_rate),
            format!("{:.2}", self.total_miles),
            format!("{:.2}", self.avg_trip_duration),
            format!("{:.2}", self.avg_idle_time),
            format!("{:.2}", self.utilization_rate),
        ]
    }
}

// what the replay of a single trip contributed to the totals.
struct TripObservation {
    delay_minutes: f64,
    idle_minutes: f64,
    duration_minutes: f64,
    miles: f64,
    utilization: f64,
}

// a driver's mutable position in space and time during replay.
struct DriverState {
    location: GeoPoint,
    time: NaiveDateTime,
}

/// Replay one strategy's assignments driver by driver and aggregate the realized
/// metrics.  A driver serves their trips strictly sequentially: deadhead to the
/// pickup, wait out any early arrival, execute, then start the next trip from
/// the dropoff point.
///
/// Noise draws, when enabled, are consumed in driver-then-trip order from the
/// given rng, so a fixed seed makes the whole replay reproducible.
pub fn simulate_assignments(trips: &Vec<Trip>, table: &AssignmentTable, pool: &DriverPool,
                            cfg: &SimConfig, rng: &mut Isaac64Rng)
                            -> SimulationResult {
    let trips_by_id: HashMap<&str, &Trip> =
        trips.iter().map(|tt| (tt.id.as_str(), tt)).collect();

    // group each driver's trips; replay order over drivers follows the roster so
    // the noise stream is consumed in a fixed order.
    let mut trips_by_driver: HashMap<&str, Vec<&Trip>> = HashMap::new();
    for aa in &table.assignments {
        let trip = trips_by_id[aa.trip_id.as_str()];
        trips_by_driver.entry(aa.driver_id.as_str()).or_insert(vec![]).push(trip);
    }

    let deadhead_noise = Normal::new(1.0, DEADHEAD_NOISE_STDEV).unwrap();
    let execution_noise = Normal::new(1.0, EXECUTION_NOISE_STDEV).unwrap();

    let mut observations = vec![];
    for driver_id in &pool.ids {
        let mut driver_trips = match trips_by_driver.remove(driver_id.as_str()) {
            Some(tts) => tts,
            None => continue,
        };
        driver_trips.sort_by_key(|tt| tt.scheduled_pickup_time);
        log::debug!("replaying {} trips for driver {}", driver_trips.len(), driver_id);

        let mut state = DriverState {
            location: pool.start_locations[driver_id].clone(),
            time: shift_start(driver_trips[0].scheduled_pickup_time, cfg.service_start_hour),
        };
        let capacity = pool.capacities[driver_id];

        for trip in driver_trips {
            // a fresh day starts with a fresh shift; without this, the overnight
            // gap would show up as a monster idle period.
            if trip.scheduled_pickup_time.date() > state.time.date() {
                state.time = shift_start(trip.scheduled_pickup_time, cfg.service_start_hour);
            }

            let deadhead_miles = state.location.haversine_distance_mi(&trip.pickup);
            let mut deadhead_minutes = deadhead_miles / cfg.avg_speed_mph * 60.0;
            if cfg.use_noise {
                deadhead_minutes *= deadhead_noise.sample(rng);
            }

            let arrival = state.time + minutes_to_duration(deadhead_minutes);
            // no early pickups: wait for the scheduled time if we beat it.
            let actual_pickup = max(arrival, trip.scheduled_pickup_time);

            let mut execution_minutes =
                trip.duration_minutes_or(cfg.default_trip_duration_minutes);
            if cfg.use_noise {
                execution_minutes *= execution_noise.sample(rng);
            }
            let dropoff_time = actual_pickup + minutes_to_duration(execution_minutes);

            observations.push(TripObservation {
                delay_minutes: minutes_between(trip.scheduled_pickup_time, actual_pickup),
                idle_minutes: minutes_between(arrival, actual_pickup),
                duration_minutes: execution_minutes,
                miles: deadhead_miles + trip.floored_distance_miles(),
                utilization: trip.num_passengers as f64 / capacity as f64,
            });

            state.location = trip.dropoff.clone();
            state.time = dropoff_time;
        }
    }

    aggregate(table.strategy.name(), &observations, cfg)
}

/// When a driver comes on duty for a day: an hour before their first scheduled
/// pickup, but never before the service day opens.
fn shift_start(first_pickup: NaiveDateTime, service_start_hour: u32) -> NaiveDateTime {
    let day_open = first_pickup.date().and_hms_opt(service_start_hour, 0, 0).unwrap();
    max(first_pickup - Duration::hours(1), day_open)
}

/// Roll per-trip observations up into one result.  Empty observation sets give a
/// zeroed result rather than dividing by zero.
fn aggregate(strategy_name: &str, observations: &Vec<TripObservation>, cfg: &SimConfig)
             -> SimulationResult {
    let nn = observations.len();
    if nn == 0 {
        return SimulationResult::empty(strategy_name);
    }

    let on_time_count = observations.iter().
        filter(|oo| oo.delay_minutes <= cfg.on_time_threshold_minutes).count();
    let total_miles: f64 = observations.iter().map(|oo| oo.miles).sum();
    let total_duration: f64 = observations.iter().map(|oo| oo.duration_minutes).sum();
    let total_idle: f64 = observations.iter().map(|oo| oo.idle_minutes).sum();
    let total_utilization: f64 = observations.iter().map(|oo| oo.utilization).sum();

    SimulationResult {
        strategy_name: String::from(strategy_name),
        total_trips: nn,
        on_time_rate: on_time_count as f64 / nn as f64,
        total_miles,
        avg_trip_duration: total_duration / nn as f64,
        avg_idle_time: total_idle / nn as f64,
        utilization_rate: total_utilization / nn as f64,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
