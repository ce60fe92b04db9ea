//! Error types and handling
//!
//! This module contains error types and the result alias used across the
//! simulation engine.

use thiserror::Error;

use crate::types::{ConfigValidationError, ElevatorId};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A request was rejected before it reached any elevator
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The elevator cannot accept work in its current state
    #[error("Elevator {0} is not in service")]
    OutOfService(ElevatorId),

    /// An elevator with the same identifier is already installed
    #[error("Elevator {0} is already installed in this building")]
    DuplicateElevator(ElevatorId),

    /// The elevator is not installed in this building
    #[error("Elevator {0} is not installed in this building")]
    UnknownElevator(ElevatorId),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Configuration(#[from] ConfigValidationError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an out of service error
    pub fn out_of_service(id: ElevatorId) -> Self {
        Self::OutOfService(id)
    }

    /// Create a duplicate elevator error
    pub fn duplicate_elevator(id: ElevatorId) -> Self {
        Self::DuplicateElevator(id)
    }

    /// Create an unknown elevator error
    pub fn unknown_elevator(id: ElevatorId) -> Self {
        Self::UnknownElevator(id)
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
