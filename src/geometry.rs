static EARTH_RADIUS_MI: f64 = 3959.0;

#[derive(PartialEq, Debug, Clone)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lng_deg: f64) -> GeoPoint {
        GeoPoint{lat_deg, lng_deg}
    }

    /// Great-circle distance in miles between two points, by the haversine formula.
    /// Coordinates outside the valid lat/lng ranges give mathematically defined but
    /// meaningless results; range checks belong to the upstream cleaning step.
    pub fn haversine_distance_mi(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat_deg.to_radians();
        let lat2 = other.lat_deg.to_radians();
        let dlat = (other.lat_deg - self.lat_deg).to_radians();
        let dlng = (other.lng_deg - self.lng_deg).to_radians();

        let aa = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let cc = 2.0 * aa.sqrt().asin();

        return EARTH_RADIUS_MI * cc;
    }
}

/// A lat/lng bounding box, used to scatter driver start locations.
#[derive(Debug, Clone)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    /// The Phoenix, AZ metro box the historical trip data was drawn from.
    pub fn phoenix_metro() -> GeoBounds {
        GeoBounds {
            lat_min: 33.2,
            lat_max: 33.7,
            lng_min: -112.3,
            lng_max: -111.8,
        }
    }
}
