//! Enumeration types for the elevator dispatch simulator
//!
//! This module contains the enumeration types used throughout the simulation
//! engine: travel directions and the observable elevator status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Travel direction of a passenger or a moving elevator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward higher floors
    Up,
    /// Toward lower floors
    Down,
}

impl Direction {
    /// Direction an elevator at `from` must take to reach `to`
    ///
    /// Equal floors resolve to `Up`; callers handle the at-floor case before
    /// asking for a direction.
    pub fn toward(from: usize, to: usize) -> Self {
        if from > to {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Observable operating status of an elevator unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElevatorStatus {
    /// Unit is halted; it accepts no requests and its loop is not running
    NotInService,
    /// Unit is parked with nothing to do, polling its queue
    Idle,
    /// Unit is travelling one floor per `floor_speed` tick
    Moving,
    /// Unit is stopped with doors open, exchanging passengers
    Loading,
}

impl fmt::Display for ElevatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorStatus::NotInService => write!(f, "Not In Service"),
            ElevatorStatus::Idle => write!(f, "Idle"),
            ElevatorStatus::Moving => write!(f, "Moving"),
            ElevatorStatus::Loading => write!(f, "Loading"),
        }
    }
}

impl FromStr for ElevatorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not in service" | "notinservice" | "out of service" => {
                Ok(ElevatorStatus::NotInService)
            }
            "idle" => Ok(ElevatorStatus::Idle),
            "moving" => Ok(ElevatorStatus::Moving),
            "loading" => Ok(ElevatorStatus::Loading),
            _ => Err(format!("Unknown elevator status: {}", s)),
        }
    }
}
