//! Unique identifier types for the elevator dispatch simulator
//!
//! This module contains UUID-based identifier types for elevator units and
//! passengers used throughout the simulation engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an elevator unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElevatorId(pub Uuid);

impl ElevatorId {
    /// Create a new random elevator ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElevatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELEV_{}", self.0.simple())
    }
}

impl Serialize for ElevatorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("ELEV_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for ElevatorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("ELEV_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(ElevatorId(uuid))
        } else {
            // Fallback: try to parse as raw UUID for backward compatibility
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(ElevatorId(uuid))
        }
    }
}

/// Unique identifier for a passenger travel request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassengerId(pub Uuid);

impl PassengerId {
    /// Create a new random passenger ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PassengerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PSGR_{}", self.0.simple())
    }
}

impl Serialize for PassengerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("PSGR_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for PassengerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("PSGR_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(PassengerId(uuid))
        } else {
            // Fallback: try to parse as raw UUID for backward compatibility
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(PassengerId(uuid))
        }
    }
}
