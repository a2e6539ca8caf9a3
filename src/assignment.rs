// standard library imports
use std::collections::HashMap;

// non-standard crate imports
use chrono::NaiveDateTime;
use itertools::Itertools;

// imports of other modules from this crate
use super::config_utils::minutes_to_duration;
use super::fleet::DriverPool;
use super::sim_config::SimConfig;
use super::trips::{active_trips, Trip};

// score given to a driver whose vehicle is too small for the trip; large enough
// that any sufficient vehicle beats it, small enough to still order undersized
// drivers when nothing else is free.
static UNDERSIZED_PENALTY: i64 = 1000;

/// The closed set of dispatch policies under comparison.  New policies are rare,
/// deliberate additions, so a plugin mechanism would be overkill here.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Strategy {
    Fcfs,
    Nearest,
    CapacityAware,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Fcfs => "FCFS",
            Strategy::Nearest => "Nearest",
            Strategy::CapacityAware => "Capacity-Aware",
        }
    }

    /// All strategies, in the fixed order comparison tables report them.
    pub fn all() -> [Strategy; 3] {
        [Strategy::Fcfs, Strategy::Nearest, Strategy::CapacityAware]
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Assignment {
    pub trip_id: String,
    pub driver_id: String,
}

/// One strategy's trip-to-driver table.  Read-only once built; every
/// non-cancelled input trip appears exactly once.
pub struct AssignmentTable {
    pub strategy: Strategy,
    pub assignments: Vec<Assignment>,
}

/// Run the given strategy over the non-cancelled trips.  The driver pool is
/// treated as read-only; strategies that track positions work on private copies.
pub fn assign_trips(strategy: Strategy, trips: &Vec<Trip>, pool: &DriverPool, cfg: &SimConfig)
                    -> AssignmentTable {
    if pool.is_empty() {
        log::warn!("driver pool is empty; no trips can be assigned");
        return AssignmentTable {strategy, assignments: vec![]};
    }

    let assignments = match strategy {
        Strategy::Fcfs => assign_fcfs(trips, pool, cfg),
        Strategy::Nearest => assign_nearest(trips, pool, cfg),
        Strategy::CapacityAware => assign_capacity_aware(trips, pool, cfg),
    };
    log::debug!("{} strategy assigned {} trips", strategy.name(), assignments.len());

    AssignmentTable {strategy, assignments}
}

/// First-come-first-served: trips in requested order go to the first free driver
/// in roster order.  If the whole fleet is busy, the trip goes to whichever
/// driver frees up soonest, even when that makes the pickup unavoidably late.
fn assign_fcfs(trips: &Vec<Trip>, pool: &DriverPool, cfg: &SimConfig) -> Vec<Assignment> {
    let mut available_at = initial_availability(pool);
    let mut assignments = vec![];

    let ordered = active_trips(trips).into_iter().
        sorted_by_key(|tt| tt.requested_pickup_time);
    for trip in ordered {
        let candidates = free_drivers(pool, &available_at, trip.scheduled_pickup_time);

        let assigned = match candidates.first() {
            Some(id) => (*id).clone(),
            // all busy: take the soonest-free driver, ties to roster order.
            None => earliest_free_driver(pool, &available_at),
        };

        mark_busy(&mut available_at, &assigned, trip, cfg);
        assignments.push(Assignment {trip_id: trip.id.clone(), driver_id: assigned});
    }

    assignments
}

/// Nearest-available: trips in scheduled order go to the free driver closest to
/// the pickup point.  Driver positions drift as they are assigned, so later
/// picks reflect where the fleet actually ended up.
fn assign_nearest(trips: &Vec<Trip>, pool: &DriverPool, cfg: &SimConfig) -> Vec<Assignment> {
    let mut available_at = initial_availability(pool);
    // private copy: position drift must not leak into other strategy runs.
    let mut locations = pool.start_locations.clone();
    let mut assignments = vec![];

    let ordered = active_trips(trips).into_iter().
        sorted_by_key(|tt| tt.scheduled_pickup_time);
    for trip in ordered {
        let mut candidates = free_drivers(pool, &available_at, trip.scheduled_pickup_time);
        if candidates.is_empty() {
            // all busy: consider the whole fleet.
            candidates = pool.ids.iter().collect();
        }

        let mut assigned = candidates[0];
        let mut best_dist = locations[assigned].haversine_distance_mi(&trip.pickup);
        for id in &candidates[1..] {
            let dist = locations[*id].haversine_distance_mi(&trip.pickup);
            if dist < best_dist {
                best_dist = dist;
                assigned = *id;
            }
        }
        let assigned = assigned.clone();

        locations.insert(assigned.clone(), trip.dropoff.clone());
        mark_busy(&mut available_at, &assigned, trip, cfg);
        assignments.push(Assignment {trip_id: trip.id.clone(), driver_id: assigned});
    }

    assignments
}

/// Capacity-aware: trips in scheduled order go to the free driver whose vehicle
/// fits the passenger count with the least excess seating.  Undersized vehicles
/// carry a fixed penalty, so they are only chosen when nothing else is free.
fn assign_capacity_aware(trips: &Vec<Trip>, pool: &DriverPool, cfg: &SimConfig)
                         -> Vec<Assignment> {
    let mut available_at = initial_availability(pool);
    let mut assignments = vec![];

    let ordered = active_trips(trips).into_iter().
        sorted_by_key(|tt| tt.scheduled_pickup_time);
    for trip in ordered {
        let mut candidates = free_drivers(pool, &available_at, trip.scheduled_pickup_time);
        if candidates.is_empty() {
            candidates = pool.ids.iter().collect();
        }

        let capacity_score = |id: &String| -> i64 {
            let capacity = pool.capacities[id];
            if capacity < trip.num_passengers {
                return UNDERSIZED_PENALTY;
            }
            (capacity - trip.num_passengers) as i64
        };

        let mut assigned = candidates[0];
        let mut best_score = capacity_score(assigned);
        for id in &candidates[1..] {
            let score = capacity_score(*id);
            if score < best_score {
                best_score = score;
                assigned = *id;
            }
        }
        let assigned = assigned.clone();

        mark_busy(&mut available_at, &assigned, trip, cfg);
        assignments.push(Assignment {trip_id: trip.id.clone(), driver_id: assigned});
    }

    assignments
}

/// Seed every driver as available since forever.
fn initial_availability(pool: &DriverPool) -> HashMap<String, NaiveDateTime> {
    pool.ids.iter().map(|id| (id.clone(), NaiveDateTime::MIN)).collect()
}

/// Drivers free by the given time, in roster order.
fn free_drivers<'a>(pool: &'a DriverPool, available_at: &HashMap<String, NaiveDateTime>,
                    by_time: NaiveDateTime)
                    -> Vec<&'a String> {
    pool.ids.iter().filter(|id| available_at[*id] <= by_time).collect()
}

/// The driver who frees up soonest; strict comparison keeps ties in roster order.
fn earliest_free_driver(pool: &DriverPool, available_at: &HashMap<String, NaiveDateTime>)
                        -> String {
    let mut earliest = &pool.ids[0];
    for id in &pool.ids[1..] {
        if available_at[id] < available_at[earliest] {
            earliest = id;
        }
    }
    earliest.clone()
}

/// Estimate when the driver will be free again: the scheduled pickup plus the
/// trip duration plus the turnaround buffer.
fn mark_busy(available_at: &mut HashMap<String, NaiveDateTime>, driver_id: &str, trip: &Trip,
             cfg: &SimConfig) {
    let duration = trip.duration_minutes_or(cfg.default_trip_duration_minutes);
    let finish = trip.scheduled_pickup_time
        + minutes_to_duration(duration + cfg.turnaround_minutes);
    available_at.insert(String::from(driver_id), finish);
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::geometry::GeoPoint;
    use super::super::test_utils::{make_sample_trips, make_test_pool, test_time};
    use super::*;

    fn check_assigns_every_active_trip(strategy: Strategy) {
        let trips = make_sample_trips();
        let pool = make_test_pool();
        let cfg = SimConfig::default();

        let table = assign_trips(strategy, &trips, &pool, &cfg);

        assert_eq!(table.assignments.len(), active_trips(&trips).len());

        // every active trip exactly once, every driver from the pool
        let assigned_ids: HashSet<&str> =
            table.assignments.iter().map(|aa| aa.trip_id.as_str()).collect();
        assert_eq!(assigned_ids.len(), table.assignments.len());
        for aa in &table.assignments {
            assert!(pool.ids.contains(&aa.driver_id));
        }
    }

    #[test]
    fn test_all_strategies_assign_every_active_trip() {
        for strategy in Strategy::all().iter() {
            check_assigns_every_active_trip(*strategy);
        }
    }

    #[test]
    fn test_empty_pool_assigns_nothing() {
        let trips = make_sample_trips();
        let pool = DriverPool::from_attributes(vec![], Default::default(), Default::default());
        let cfg = SimConfig::default();

        let table = assign_trips(Strategy::Fcfs, &trips, &pool, &cfg);
        assert!(table.assignments.is_empty());
    }

    #[test]
    fn test_cancelled_trips_are_skipped() {
        let mut trips = make_sample_trips();
        trips[2].is_cancelled = true;
        let pool = make_test_pool();
        let cfg = SimConfig::default();

        let table = assign_trips(Strategy::Fcfs, &trips, &pool, &cfg);
        assert_eq!(table.assignments.len(), trips.len() - 1);
        assert!(table.assignments.iter().all(|aa| aa.trip_id != trips[2].id));
    }

    #[test]
    fn test_nearest_prefers_colocated_driver() {
        let trips = make_sample_trips();
        let mut pool = make_test_pool();
        // put the last driver right on the first pickup and the rest far away
        let first_pickup = trips[0].pickup.clone();
        let far_away = GeoPoint::new(34.9, -113.5);
        for id in &pool.ids {
            pool.start_locations.insert(id.clone(), far_away.clone());
        }
        let colocated = pool.ids.last().unwrap().clone();
        pool.start_locations.insert(colocated.clone(), first_pickup);

        let cfg = SimConfig::default();
        let table = assign_trips(Strategy::Nearest, &trips, &pool, &cfg);

        let first = table.assignments.iter().find(|aa| aa.trip_id == trips[0].id).unwrap();
        assert_eq!(first.driver_id, colocated);
    }

    #[test]
    fn test_capacity_aware_skips_undersized_driver() {
        let trips = make_sample_trips();
        let pool = make_test_pool();
        let cfg = SimConfig::default();

        let table = assign_trips(Strategy::CapacityAware, &trips, &pool, &cfg);

        // the 3-passenger trip must not go in the 2-seat vehicle while larger
        // ones are free.
        let three_pass = trips.iter().find(|tt| tt.num_passengers == 3).unwrap();
        let assignment =
            table.assignments.iter().find(|aa| aa.trip_id == three_pass.id).unwrap();
        assert!(pool.capacities[&assignment.driver_id] >= 3);
    }

    #[test]
    fn test_fcfs_falls_back_to_soonest_free_driver() {
        // three trips at the same moment, two drivers: the third trip has nobody
        // free and must go to the driver with the shorter first trip.
        let when = test_time(8, 0);
        let pickup = GeoPoint::new(33.4, -112.0);
        let dropoff = GeoPoint::new(33.42, -112.02);
        let trips = vec![
            Trip::new("T001", when, when, pickup.clone(), dropoff.clone(), 5.0, Some(60.0), 1,
                      false),
            Trip::new("T002", when, when, pickup.clone(), dropoff.clone(), 5.0, Some(20.0), 1,
                      false),
            Trip::new("T003", when, when, pickup, dropoff, 5.0, Some(20.0), 1, false),
        ];
        let mut pool = make_test_pool();
        pool.ids.truncate(2);

        let cfg = SimConfig::default();
        let table = assign_trips(Strategy::Fcfs, &trips, &pool, &cfg);

        assert_eq!(table.assignments[0].driver_id, pool.ids[0]);
        assert_eq!(table.assignments[1].driver_id, pool.ids[1]);
        // second driver finishes at +30min, first at +70min.
        assert_eq!(table.assignments[2].driver_id, pool.ids[1]);
    }
}
