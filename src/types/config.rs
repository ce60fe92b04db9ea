//! Configuration structures for the elevator dispatch simulator
//!
//! This module contains the simulation configuration structure and validation
//! logic used to control the building layout, elevator fleet specs, and demo
//! workload of the simulation engine.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-dispatch-simulator",
    version = "0.1.0",
    about = "Elevator Dispatch Simulator - Drives a building of autonomous elevators in real time",
    long_about = "Simulates a building of autonomous elevators serving randomly sampled passenger \
travel requests. Each elevator runs its own scheduling loop; a building-level dispatcher \
assigns every waiting passenger to the unit that can reach them soonest.

EXAMPLES:
    # Run with default settings
    elevator-dispatch-simulator

    # Use a configuration file
    elevator-dispatch-simulator --config config.json

    # Override specific settings
    elevator-dispatch-simulator --floors 16 --elevator-count 4

    # Speed the clock up for a quick demo
    elevator-dispatch-simulator --floor-travel-ms 100 --loading-time-ms 200

    # Generate configuration template
    elevator-dispatch-simulator --print-config > my-config.json

    # Validate configuration without running
    elevator-dispatch-simulator --config my-config.json --dry-run

    # Enable verbose logging
    elevator-dispatch-simulator --verbose

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of floors in the building
    #[arg(
        long,
        help = "Number of floors in the building",
        long_help = "Number of floors in the simulated building. Must be at least 2 so that \
distinct origin/destination pairs exist. Default: 10"
    )]
    pub floors: Option<usize>,

    /// Number of elevator units to install
    #[arg(
        long,
        help = "Number of elevator units",
        long_help = "Number of elevator units installed in the building. Must be greater than 0. Default: 3"
    )]
    pub elevator_count: Option<usize>,

    /// Passenger capacity of each elevator
    #[arg(long, help = "Passenger capacity of each elevator")]
    pub elevator_capacity: Option<usize>,

    /// Milliseconds an elevator takes to travel one floor
    #[arg(long, help = "Milliseconds to travel one floor")]
    pub floor_travel_ms: Option<u64>,

    /// Milliseconds an elevator spends loading at a stop
    #[arg(long, help = "Milliseconds spent loading at a stop")]
    pub loading_time_ms: Option<u64>,

    /// Milliseconds an idle elevator waits between queue polls
    #[arg(long, help = "Milliseconds between idle queue polls")]
    pub idle_poll_ms: Option<u64>,

    /// Milliseconds between building dispatch passes
    #[arg(long, help = "Milliseconds between dispatch passes")]
    pub dispatch_interval_ms: Option<u64>,

    /// Number of passengers to generate for the demo run
    #[arg(
        long,
        help = "Number of passengers to generate",
        long_help = "Total number of randomly sampled passengers fed into the building over the \
course of the run. Must be greater than 0. Default: 10"
    )]
    pub passenger_count: Option<usize>,

    /// Mean milliseconds between passenger arrivals
    #[arg(long, help = "Mean milliseconds between passenger arrivals")]
    pub arrival_interval_ms: Option<u64>,

    /// Seconds to wait for all passengers to be delivered before giving up
    #[arg(long, help = "Seconds before an unfinished run is abandoned")]
    pub run_timeout_secs: Option<u64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Output path for the final statistics report (JSON)
    #[arg(long, help = "Output path for the statistics report JSON file")]
    pub stats_output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of floors in the building
    pub floors: Option<usize>,

    /// Number of elevator units to install
    pub elevator_count: Option<usize>,

    /// Passenger capacity of each elevator
    pub elevator_capacity: Option<usize>,

    /// Milliseconds an elevator takes to travel one floor
    pub floor_travel_ms: Option<u64>,

    /// Milliseconds an elevator spends loading at a stop
    pub loading_time_ms: Option<u64>,

    /// Milliseconds an idle elevator waits between queue polls
    pub idle_poll_ms: Option<u64>,

    /// Milliseconds between building dispatch passes
    pub dispatch_interval_ms: Option<u64>,

    /// Number of passengers to generate for the demo run
    pub passenger_count: Option<usize>,

    /// Mean milliseconds between passenger arrivals
    pub arrival_interval_ms: Option<u64>,

    /// Seconds to wait for all passengers to be delivered before giving up
    pub run_timeout_secs: Option<u64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output path for the final statistics report (JSON)
    pub stats_output: Option<String>,
}

/// Configuration for the elevator dispatch simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of floors in the building
    pub floors: usize,

    /// Number of elevator units to install
    pub elevator_count: usize,

    /// Passenger capacity of each elevator
    pub elevator_capacity: usize,

    /// Milliseconds an elevator takes to travel one floor
    pub floor_travel_ms: u64,

    /// Milliseconds an elevator spends loading at a stop
    pub loading_time_ms: u64,

    /// Milliseconds an idle elevator waits between queue polls
    pub idle_poll_ms: u64,

    /// Milliseconds between building dispatch passes
    pub dispatch_interval_ms: u64,

    /// Number of passengers to generate for the demo run
    pub passenger_count: usize,

    /// Mean milliseconds between passenger arrivals
    pub arrival_interval_ms: u64,

    /// Seconds to wait for all passengers to be delivered before giving up
    pub run_timeout_secs: u64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output path for the final statistics report (JSON)
    pub stats_output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Floor count is invalid
    #[error("Floor count must be at least 2 so distinct travel requests exist, got {0}")]
    InvalidFloorCount(usize),

    /// Elevator count is invalid
    #[error("Elevator count must be greater than 0, got {0}")]
    InvalidElevatorCount(usize),

    /// Elevator capacity is invalid
    #[error("Elevator capacity must be greater than 0, got {0}")]
    InvalidElevatorCapacity(usize),

    /// Passenger count is invalid
    #[error("Passenger count must be greater than 0, got {0}")]
    InvalidPassengerCount(usize),

    /// A timing field is zero
    #[error("Invalid timing for {field}: must be greater than 0 ms")]
    InvalidTiming {
        /// Name of the timing field that is zero
        field: String,
    },

    /// Run timeout is invalid
    #[error("Run timeout must be greater than 0 seconds, got {0}")]
    InvalidRunTimeout(u64),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            floors: 10,
            elevator_count: 3,
            elevator_capacity: 10,
            floor_travel_ms: 1_000,
            loading_time_ms: 2_000,
            idle_poll_ms: 1_000,
            dispatch_interval_ms: 1_000,
            passenger_count: 10,
            arrival_interval_ms: 500,
            run_timeout_secs: 120,
            seed: None,
            stats_output: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    ///
    /// Precedence, lowest to highest: defaults, config file, CLI flags.
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            floors: config_file.floors.unwrap_or(defaults.floors),
            elevator_count: config_file.elevator_count.unwrap_or(defaults.elevator_count),
            elevator_capacity: config_file
                .elevator_capacity
                .unwrap_or(defaults.elevator_capacity),
            floor_travel_ms: config_file.floor_travel_ms.unwrap_or(defaults.floor_travel_ms),
            loading_time_ms: config_file.loading_time_ms.unwrap_or(defaults.loading_time_ms),
            idle_poll_ms: config_file.idle_poll_ms.unwrap_or(defaults.idle_poll_ms),
            dispatch_interval_ms: config_file
                .dispatch_interval_ms
                .unwrap_or(defaults.dispatch_interval_ms),
            passenger_count: config_file.passenger_count.unwrap_or(defaults.passenger_count),
            arrival_interval_ms: config_file
                .arrival_interval_ms
                .unwrap_or(defaults.arrival_interval_ms),
            run_timeout_secs: config_file.run_timeout_secs.unwrap_or(defaults.run_timeout_secs),
            seed: config_file.seed.or(defaults.seed),
            stats_output: config_file.stats_output.or(defaults.stats_output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.floors {
            config.floors = value;
        }
        if let Some(value) = args.elevator_count {
            config.elevator_count = value;
        }
        if let Some(value) = args.elevator_capacity {
            config.elevator_capacity = value;
        }
        if let Some(value) = args.floor_travel_ms {
            config.floor_travel_ms = value;
        }
        if let Some(value) = args.loading_time_ms {
            config.loading_time_ms = value;
        }
        if let Some(value) = args.idle_poll_ms {
            config.idle_poll_ms = value;
        }
        if let Some(value) = args.dispatch_interval_ms {
            config.dispatch_interval_ms = value;
        }
        if let Some(value) = args.passenger_count {
            config.passenger_count = value;
        }
        if let Some(value) = args.arrival_interval_ms {
            config.arrival_interval_ms = value;
        }
        if let Some(value) = args.run_timeout_secs {
            config.run_timeout_secs = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.stats_output {
            config.stats_output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Validate building layout
        if self.floors < 2 {
            return Err(ConfigValidationError::InvalidFloorCount(self.floors));
        }

        // Validate fleet
        if self.elevator_count == 0 {
            return Err(ConfigValidationError::InvalidElevatorCount(self.elevator_count));
        }
        if self.elevator_capacity == 0 {
            return Err(ConfigValidationError::InvalidElevatorCapacity(self.elevator_capacity));
        }

        // Validate workload
        if self.passenger_count == 0 {
            return Err(ConfigValidationError::InvalidPassengerCount(self.passenger_count));
        }

        // Validate timings
        self.validate_timing("floor_travel_ms", self.floor_travel_ms)?;
        self.validate_timing("loading_time_ms", self.loading_time_ms)?;
        self.validate_timing("idle_poll_ms", self.idle_poll_ms)?;
        self.validate_timing("dispatch_interval_ms", self.dispatch_interval_ms)?;

        if self.run_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidRunTimeout(self.run_timeout_secs));
        }

        Ok(())
    }

    /// Helper method to validate timing values
    fn validate_timing(&self, field: &str, value: u64) -> Result<(), ConfigValidationError> {
        if value == 0 {
            return Err(ConfigValidationError::InvalidTiming { field: field.to_string() });
        }
        Ok(())
    }

    /// Time an elevator takes to travel one floor
    pub fn floor_travel(&self) -> Duration {
        Duration::from_millis(self.floor_travel_ms)
    }

    /// Time an elevator spends loading at a stop
    pub fn loading_time(&self) -> Duration {
        Duration::from_millis(self.loading_time_ms)
    }

    /// Interval between idle queue polls
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    /// Interval between building dispatch passes
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms)
    }

    /// Mean gap between generated passenger arrivals
    pub fn arrival_interval(&self) -> Duration {
        Duration::from_millis(self.arrival_interval_ms)
    }

    /// Deadline for an unfinished run
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}
