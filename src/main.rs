use env_logger;

use nemt_routing_sim::{run_comparison, save_results, SimConfig, Trip};


fn main() {
    env_logger::init();

    // with no config argument, run against the default pipeline paths.
    let cfg = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_file(&path),
        None => SimConfig::default(),
    };

    let trips = match Trip::all_from_csv(&cfg.trips_path) {
        Ok(trips) => trips,
        Err(why) => panic!("couldn't load trips from {}: {}", cfg.trips_path.display(), why),
    };

    let results = run_comparison(&trips, &cfg);

    println!("{:<16} {:>11} {:>12} {:>12} {:>13} {:>14} {:>12}",
             "strategy", "total_trips", "on_time_rate", "total_miles", "avg_duration",
             "avg_idle_time", "utilization");
    for result in &results {
        let row = result.to_summary();
        println!("{:<16} {:>11} {:>12.2} {:>12.2} {:>13.2} {:>14.2} {:>12.2}",
                 row.strategy, row.total_trips, row.on_time_rate, row.total_miles,
                 row.avg_trip_duration, row.avg_idle_time, row.utilization_rate);
    }

    if let Err(why) = save_results(&results, &cfg.results_path) {
        panic!("couldn't save results to {}: {}", cfg.results_path.display(), why);
    }
}
