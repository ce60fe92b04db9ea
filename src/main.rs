// Elevator Dispatch Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-dispatch-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/elevator-dispatch-simulator --floors 16 --elevator-count 4 --verbose
// ```

use clap::Parser;
use elevator_dispatch_simulator::simulation::{
    LoggingConfig, SimulationRunner, SimulationStatistics,
};
use elevator_dispatch_simulator::types::config::CliArgs;
use elevator_dispatch_simulator::types::SimulationConfig;
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Template printing bypasses the simulation entirely
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Logging verbosity follows the CLI flags; quiet by default
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Elevator Dispatch Simulator");

    // Defaults, then the optional config file, then CLI overrides
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // A dry run stops after validation
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    let runner = match SimulationRunner::new(config.clone()) {
        Ok(runner) => runner,
        Err(e) => {
            error!("Failed to initialize simulation: {}", e);
            process::exit(1);
        }
    };

    let statistics = match runner.run() {
        Ok(statistics) => statistics,
        Err(e) => {
            error!("Simulation failed: {}", e);
            process::exit(1);
        }
    };

    print_final_statistics(&statistics);

    // Export statistics as JSON if requested
    if let Some(path) = &config.stats_output {
        if let Err(e) = statistics.save_to_file(path) {
            error!("Failed to write statistics to '{}': {}", path, e);
            process::exit(1);
        }
        info!("Statistics written to: {}", path);
        eprintln!("Statistics written to: {}", path);
    }

    info!("Elevator Dispatch Simulator completed successfully");
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Elevator Dispatch Simulator");
    eprintln!("===========================");
    eprintln!("A multi-elevator dispatch simulation with autonomous cars");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Floors: {}", config.floors);
    eprintln!("  Elevators: {}", config.elevator_count);
    eprintln!("  Elevator Capacity: {}", config.elevator_capacity);
    eprintln!("  Floor Travel Time: {} ms", config.floor_travel_ms);
    eprintln!("  Loading Time: {} ms", config.loading_time_ms);
    eprintln!("  Idle Poll Interval: {} ms", config.idle_poll_ms);
    eprintln!("  Dispatch Interval: {} ms", config.dispatch_interval_ms);
    eprintln!("  Passengers: {}", config.passenger_count);
    eprintln!("  Arrival Interval: {} ms", config.arrival_interval_ms);
    eprintln!("  Run Timeout: {} s", config.run_timeout_secs);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if let Some(path) = &config.stats_output {
        eprintln!("  Statistics Output: {}", path);
    }
    eprintln!();
}

/// Print the final statistics report
fn print_final_statistics(statistics: &SimulationStatistics) {
    eprintln!("{}", statistics.generate_summary_report());
}
