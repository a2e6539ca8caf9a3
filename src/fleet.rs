// standard library imports
use std::collections::HashMap;

// non-standard crate imports
use rand::Rng;
use rand::seq::SliceRandom;
use rand_isaac::Isaac64Rng;

// imports of other modules from this crate
use super::geometry::{GeoBounds, GeoPoint};

// the vehicle sizes present in the contracted fleet.
static FLEET_CAPACITIES: [u32; 3] = [2, 4, 6];

/// The driver roster for one comparison run.  Start locations and capacities are
/// drawn once and shared read-only across all strategies, so differences between
/// strategy results reflect assignment policy rather than fleet setup.
///
/// `ids` fixes the iteration order everywhere drivers are scanned; the maps are
/// only ever used for lookup.  Tie-breaks therefore always resolve to the
/// earliest driver in roster order, independent of hash ordering.
pub struct DriverPool {
    pub ids: Vec<String>,
    pub start_locations: HashMap<String, GeoPoint>,
    pub capacities: HashMap<String, u32>,
}

impl DriverPool {
    /// Generate a fleet of the given size from the seeded rng.  Draws happen in a
    /// fixed order (all locations in roster order, then all capacities) so a given
    /// seed always produces the same fleet.
    pub fn generate(num_drivers: usize, bounds: &GeoBounds, rng: &mut Isaac64Rng) -> DriverPool {
        let ids: Vec<String> = (0..num_drivers).map(|ii| format!("DRV_{:04}", ii)).collect();

        let mut start_locations = HashMap::new();
        for id in &ids {
            let lat = rng.gen_range(bounds.lat_min..bounds.lat_max);
            let lng = rng.gen_range(bounds.lng_min..bounds.lng_max);
            start_locations.insert(id.clone(), GeoPoint::new(lat, lng));
        }

        let mut capacities = HashMap::new();
        for id in &ids {
            let capacity = *FLEET_CAPACITIES.choose(rng).unwrap();
            capacities.insert(id.clone(), capacity);
        }

        log::debug!("generated fleet of {} drivers", num_drivers);
        DriverPool {ids, start_locations, capacities}
    }

    /// Build a pool from explicit per-driver attributes, mostly useful in tests
    /// and when the roster comes from an upstream source instead of generation.
    pub fn from_attributes(ids: Vec<String>, start_locations: HashMap<String, GeoPoint>,
                           capacities: HashMap<String, u32>)
                           -> DriverPool {
        DriverPool {ids, start_locations, capacities}
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
