//! Core types and identifiers for the elevator dispatch simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! The types module provides the foundational data types for the simulation:
//!
//! - **Identifiers**: UUID-based unique identifiers for elevators and passengers
//! - **Enums**: Type-safe enumerations for travel direction and elevator status
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dispatch_simulator::types::*;
//!
//! // Create unique identifiers
//! let elevator_id = ElevatorId::new();
//! let passenger_id = PassengerId::new();
//!
//! // Use enums for type safety
//! let direction = Direction::Up;
//! let status = ElevatorStatus::Idle;
//!
//! // Configure simulation
//! let config = SimulationConfig {
//!     floors: 16,
//!     elevator_count: 4,
//!     ..Default::default()
//! };
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
