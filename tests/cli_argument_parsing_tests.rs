//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are properly parsed and
//! layered over configuration file values and defaults.

use clap::Parser;
use elevator_dispatch_simulator::types::config::{CliArgs, SimulationConfig};

/// Test building layout argument parsing
#[test]
fn test_building_layout_arguments() {
    let args = vec!["test", "--floors", "16", "--elevator-count", "4"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.floors, Some(16));
    assert_eq!(cli_args.elevator_count, Some(4));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.floors, 16);
    assert_eq!(config.elevator_count, 4);

    // Capacity travels alongside the fleet size
    let args = vec!["test", "--elevator-capacity", "6"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.elevator_capacity, Some(6));
}

/// Test drive timing argument parsing
#[test]
fn test_timing_arguments() {
    let args = vec![
        "test",
        "--floor-travel-ms", "100",
        "--loading-time-ms", "200",
        "--idle-poll-ms", "50",
        "--dispatch-interval-ms", "250",
    ];

    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.floor_travel_ms, Some(100));
    assert_eq!(cli_args.loading_time_ms, Some(200));
    assert_eq!(cli_args.idle_poll_ms, Some(50));
    assert_eq!(cli_args.dispatch_interval_ms, Some(250));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.floor_travel_ms, 100);
    assert_eq!(config.loading_time_ms, 200);
    assert_eq!(config.idle_poll_ms, 50);
    assert_eq!(config.dispatch_interval_ms, 250);
}

/// Test demo workload argument parsing
#[test]
fn test_workload_arguments() {
    let args = vec![
        "test",
        "--passenger-count", "25",
        "--arrival-interval-ms", "100",
        "--run-timeout-secs", "60",
    ];

    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.passenger_count, Some(25));
    assert_eq!(cli_args.arrival_interval_ms, Some(100));
    assert_eq!(cli_args.run_timeout_secs, Some(60));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.passenger_count, 25);
    assert_eq!(config.arrival_interval_ms, 100);
    assert_eq!(config.run_timeout_secs, 60);
}

/// Test seed argument parsing
#[test]
fn test_seed_argument_parsing() {
    let args = vec!["test", "--seed", "12345"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.seed, Some(12345));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.seed, Some(12345));
}

/// Test statistics output path argument parsing
#[test]
fn test_stats_output_argument() {
    let args = vec!["test", "--stats-output", "run-stats.json"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.stats_output, Some("run-stats.json".to_string()));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.stats_output, Some("run-stats.json".to_string()));
}

/// Test verbose and debug flags
#[test]
fn test_logging_flags() {
    // Test verbose flag
    let args = vec!["test", "--verbose"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.verbose);
    assert!(!cli_args.debug);

    // Test debug flag
    let args = vec!["test", "--debug"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(!cli_args.verbose);
    assert!(cli_args.debug);

    // Test short forms together
    let args = vec!["test", "-v", "-d"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.verbose);
    assert!(cli_args.debug);
}

/// Test dry run flag
#[test]
fn test_dry_run_flag() {
    let args = vec!["test", "--dry-run"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.dry_run);
}

/// Test print config flag
#[test]
fn test_print_config_flag() {
    let args = vec!["test", "--print-config"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.print_config);
}

/// Test defaults when nothing is passed
#[test]
fn test_no_arguments_leaves_everything_unset() {
    let args = vec!["test"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();

    assert!(cli_args.config.is_none());
    assert!(cli_args.floors.is_none());
    assert!(cli_args.elevator_count.is_none());
    assert!(cli_args.seed.is_none());
    assert!(!cli_args.verbose);
    assert!(!cli_args.dry_run);

    // An empty argument set resolves to the defaults
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.floors, 10);
    assert_eq!(config.elevator_count, 3);
    config.validate().unwrap();
}

/// Test that CLI arguments override configuration file values
#[test]
fn test_cli_overrides_config_file() {
    use std::io::Write;
    use tempfile::Builder;

    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    let config_json = r#"{
        "floors": 20,
        "elevator_count": 6,
        "floor_travel_ms": 250
    }"#;
    temp_file.write_all(config_json.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let path = temp_file.path().to_str().unwrap().to_string();
    let args = vec!["test", "--config", path.as_str(), "--floors", "12"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();

    // The CLI wins where both are set; the file wins over the defaults.
    assert_eq!(config.floors, 12);
    assert_eq!(config.elevator_count, 6);
    assert_eq!(config.floor_travel_ms, 250);
    assert_eq!(config.loading_time_ms, 2_000);
}

/// Test that out-of-range values parse fine and are caught by validation
#[test]
fn test_parsed_values_still_go_through_validation() {
    // A single floor parses (validation is a separate concern)
    let args = vec!["test", "--floors", "1"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.floors, Some(1));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err(), "One floor should fail validation");

    // Zero timing flags behave the same way
    let args = vec!["test", "--floor-travel-ms", "0"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err(), "Zero travel time should fail validation");
}

/// Test help message generation (basic test)
#[test]
fn test_help_message() {
    let args = vec!["test", "--help"];
    let result = CliArgs::try_parse_from(args);

    // Should fail with help message (this is expected behavior)
    assert!(result.is_err());

    // The error should contain help information
    let error = result.unwrap_err();
    let error_string = error.to_string();
    assert!(
        error_string.contains("elevator-dispatch-simulator") || error_string.contains("Usage")
    );
}
