//! Simulation orchestration and control
//!
//! This module contains the simulation runner, statistics collection,
//! logging setup, and error handling.
//!
//! # Overview
//!
//! The simulation module drives a full elevator dispatch run:
//!
//! - **SimulationRunner**: Builds a building and fleet from a configuration and runs it
//! - **SimulationStatistics**: Collects and reports run metrics
//! - **LoggingConfig**: Configures the tracing subscriber
//! - **SimulationError**: Error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::simulation::*;
//! use elevator_dispatch_simulator::types::*;
//!
//! // Create simulation configuration
//! let config = SimulationConfig {
//!     floors: 8,
//!     elevator_count: 2,
//!     ..Default::default()
//! };
//!
//! // Initialize the runner
//! let runner = SimulationRunner::new(config).unwrap();
//! assert_eq!(runner.config().floors, 8);
//! ```

pub mod error;
pub mod logging;
pub mod runner;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use runner::*;
pub use statistics::*;
