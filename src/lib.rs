//! Elevator Dispatch Simulator
//!
//! A multi-elevator dispatch simulation engine where autonomous elevator cars
//! serve randomly arriving passengers in a shared building.
//!
//! # Overview
//!
//! This library models a building whose elevators each run on their own
//! worker thread. A central dispatcher assigns waiting passengers to the car
//! that can pick them up soonest, and each car moves floor by floor, stopping
//! to load and unload whenever doing so cannot drag an already-assigned
//! passenger away from their destination.
//!
//! ## Key Features
//!
//! - **Autonomous Cars**: Each elevator advances its own state machine on a dedicated thread
//! - **Arrival-Time Dispatch**: Passengers go to the car with the soonest estimated pickup
//! - **Fair Boarding**: A car only picks up passengers it can serve without reversing past anyone aboard or queued
//! - **Live Snapshots**: Consistent point-in-time views of a running building
//! - **Service Counters**: Per-car floors travelled, stops, boardings, and deliveries
//! - **Configurable Simulation**: Floor counts, fleet size, speeds, and arrival patterns
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_dispatch_simulator::*;
//!
//! // A ten floor building served by one elevator
//! let building = Building::new(10)?;
//! let elevator = Elevator::sample();
//! building.add_elevator(elevator)?;
//!
//! building.start_operation()?;
//!
//! // A passenger on floor 3 wants to reach floor 7
//! let passenger = Passenger::new(3, 7)?;
//! building.enqueue(passenger)?;
//!
//! building.stop_operation();
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`passenger`]: Passenger travel requests
//! - [`elevator`]: Elevator cars, their worker threads, and boarding rules
//! - [`building`]: The building, its fleet, and the dispatcher
//! - [`simulation`]: Simulation runner, statistics, and logging
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod building;
pub mod elevator;
pub mod passenger;
pub mod simulation;

pub mod types;

// Re-export the main public types for convenience

// Core types and identifiers
pub use types::{
    ConfigValidationError,
    Direction,
    // Identifiers
    ElevatorId,
    ElevatorStatus,
    PassengerId,
    // Configuration
    SimulationConfig,
};

// Passengers
pub use passenger::Passenger;

// Elevator types and functionality
pub use elevator::{Elevator, ElevatorSnapshot, ServiceCounters};

// Building types and functionality
pub use building::{Building, BuildingSnapshot};

// Simulation types and functionality
pub use simulation::{
    LoggingConfig, SimulationError, SimulationResult, SimulationRunner, SimulationStatistics,
};
