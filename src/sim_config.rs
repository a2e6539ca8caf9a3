// standard library imports
use std::path::Path;
use std::path::PathBuf;

// non-standard crate imports
use yaml_rust::YamlLoader;

// imports of other modules from this crate
use super::config_utils;
use super::geometry::GeoBounds;


/// Tunable parameters of a comparison run.  Every knob has a default matching the
/// historical study, so a config file only needs the keys it wants to override.
#[derive(Debug, Clone)]
pub struct SimConfig {
    // path to the csv file of scored trips produced by the cleaning pipeline
    pub trips_path: PathBuf,
    // path the strategy comparison table will be written to
    pub results_path: PathBuf,
    // fleet size used when generating the driver roster
    pub num_drivers: usize,
    // seed for fleet attributes and all noise streams
    pub random_seed: u64,
    // assumed average travel speed for deadhead legs
    pub avg_speed_mph: f64,
    // whether replay applies stochastic perturbation, or is fully deterministic
    pub use_noise: bool,
    // a pickup this many minutes after schedule still counts as on time
    pub on_time_threshold_minutes: f64,
    // slack after a trip before its driver is considered available again
    pub turnaround_minutes: f64,
    // substituted when a trip record has no historical duration
    pub default_trip_duration_minutes: f64,
    // hour of day at which drivers come on shift
    pub service_start_hour: u32,
    // box within which driver start locations are scattered
    pub bounds: GeoBounds,
}

impl Default for SimConfig {
    fn default() -> SimConfig {
        SimConfig {
            trips_path: PathBuf::from("data/processed/trips_scored.csv"),
            results_path: PathBuf::from("data/processed/simulation_results.csv"),
            num_drivers: 50,
            random_seed: 42,
            avg_speed_mph: 25.0,
            use_noise: true,
            on_time_threshold_minutes: 10.0,
            turnaround_minutes: 10.0,
            default_trip_duration_minutes: 30.0,
            service_start_hour: 6,
            bounds: GeoBounds::phoenix_metro(),
        }
    }
}

impl SimConfig {
    /// Load a config from a yaml file.  Relative paths in the file are resolved
    /// against the file's own directory; missing keys keep their defaults.
    pub fn from_file(path: &str) -> SimConfig {
        let file_contents = std::fs::read_to_string(path).
            expect("Failed to read sim config file!");
        let yaml_cfgs = YamlLoader::load_from_str(&file_contents).
            expect("Failed to parse sim config as yaml!");
        let yaml_cfg = &yaml_cfgs[0];
        let config_dir = Path::new(path).parent().unwrap();

        let defaults = SimConfig::default();

        let trips_path = match yaml_cfg["trips_path"].as_str() {
            Some(pp) => config_utils::str_to_absolute_path(pp, config_dir),
            None => defaults.trips_path,
        };
        let results_path = match yaml_cfg["results_path"].as_str() {
            Some(pp) => config_utils::str_to_absolute_path(pp, config_dir),
            None => defaults.results_path,
        };

        let bounds = GeoBounds {
            lat_min: yaml_cfg["lat_min"].as_f64().unwrap_or(defaults.bounds.lat_min),
            lat_max: yaml_cfg["lat_max"].as_f64().unwrap_or(defaults.bounds.lat_max),
            lng_min: yaml_cfg["lng_min"].as_f64().unwrap_or(defaults.bounds.lng_min),
            lng_max: yaml_cfg["lng_max"].as_f64().unwrap_or(defaults.bounds.lng_max),
        };

        SimConfig {
            trips_path,
            results_path,
            num_drivers: match yaml_cfg["num_drivers"].as_i64() {
                Some(nn) => nn as usize,
                None => defaults.num_drivers,
            },
            random_seed: match yaml_cfg["random_seed"].as_i64() {
                Some(seed) => seed as u64,
                None => defaults.random_seed,
            },
            avg_speed_mph: yaml_cfg["avg_speed_mph"].as_f64().
                unwrap_or(defaults.avg_speed_mph),
            use_noise: yaml_cfg["use_noise"].as_bool().unwrap_or(defaults.use_noise),
            on_time_threshold_minutes: yaml_cfg["on_time_threshold_minutes"].as_f64().
                unwrap_or(defaults.on_time_threshold_minutes),
            turnaround_minutes: yaml_cfg["turnaround_minutes"].as_f64().
                unwrap_or(defaults.turnaround_minutes),
            default_trip_duration_minutes: yaml_cfg["default_trip_duration_minutes"].as_f64().
                unwrap_or(defaults.default_trip_duration_minutes),
            service_start_hour: match yaml_cfg["service_start_hour"].as_i64() {
                Some(hh) => hh as u32,
                None => defaults.service_start_hour,
            },
            bounds,
        }
    }
}
