// standard library imports
use std::error::Error;
use std::path::Path;

// non-standard crate imports
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// imports of other modules from this crate
use super::assignment::{assign_trips, Strategy};
use super::driver_sim::{simulate_assignments, SimulationResult, SummaryRow};
use super::fleet::DriverPool;
use super::sim_config::SimConfig;
use super::trips::Trip;


/// Run every strategy against the same trips with a freshly generated fleet and
/// collect one result per strategy, in the fixed reporting order.
pub fn run_comparison(trips: &Vec<Trip>, cfg: &SimConfig) -> Vec<SimulationResult> {
    // the master stream is consumed only by fleet generation; every strategy
    // sees the exact same driver attributes.
    let mut master_rng = Isaac64Rng::seed_from_u64(cfg.random_seed);
    let pool = DriverPool::generate(cfg.num_drivers, &cfg.bounds, &mut master_rng);

    run_comparison_with_pool(trips, &pool, cfg)
}

/// As `run_comparison`, but with a caller-supplied fleet.
pub fn run_comparison_with_pool(trips: &Vec<Trip>, pool: &DriverPool, cfg: &SimConfig)
                                -> Vec<SimulationResult> {
    let mut results = vec![];
    for strategy in Strategy::all().iter() {
        log::info!("running {} strategy on {} trips...", strategy.name(), trips.len());
        let table = assign_trips(*strategy, trips, pool, cfg);

        // every strategy replays against an identically seeded noise stream, so
        // differences in the results reflect assignment policy, not luck.
        let mut noise_rng = Isaac64Rng::seed_from_u64(cfg.random_seed);
        let result = simulate_assignments(trips, &table, pool, cfg, &mut noise_rng);
        log::info!("{}: {} trips, on-time rate {:.3}", strategy.name(), result.total_trips,
                   result.on_time_rate);
        results.push(result);
    }

    results
}

/// Persist the comparison table as a csv file for the reporting layer.
pub fn save_results(results: &Vec<SimulationResult>, path: &Path)
                    -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&SummaryRow::csv_header())?;
    for result in results {
        writer.write_record(&result.to_summary().csv_record())?;
    }
    writer.flush()?;

    log::info!("saved simulation results to {}", path.display());
    Ok(())
}
