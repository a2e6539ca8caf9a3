// imports of other modules from this crate
mod geometry;
pub use geometry::{GeoBounds, GeoPoint};

mod trips;
pub use trips::{active_trips, Trip};

mod fleet;
pub use fleet::DriverPool;

mod assignment;
pub use assignment::{assign_trips, Assignment, AssignmentTable, Strategy};

mod driver_sim;
pub use driver_sim::{simulate_assignments, SimulationResult, SummaryRow};

mod comparison;
pub use comparison::{run_comparison, run_comparison_with_pool, save_results};

mod sim_config;
pub use sim_config::SimConfig;

mod config_utils;

#[cfg(test)]
mod test_utils;
