//! Passenger travel requests
//!
//! This module contains the passenger value type fed into the building and
//! carried by elevators. A passenger is an immutable origin/destination pair;
//! its travel direction is always derived from the two floors rather than
//! stored separately.

use rand::Rng;
use serde::Serialize;

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Direction, PassengerId};

/// A single passenger travel request
///
/// Constructed through [`Passenger::new`], which rejects requests whose
/// origin and destination coincide. Once created the request never changes,
/// so it can be freely copied between the waiting queue and a cab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Passenger {
    /// Unique identifier for the passenger
    pub id: PassengerId,
    /// Floor where the passenger is waiting to board
    pub origin_floor: usize,
    /// Floor the passenger wants to reach
    pub destination_floor: usize,
}

impl Passenger {
    /// Create a new travel request from an origin floor to a destination floor
    pub fn new(origin_floor: usize, destination_floor: usize) -> SimulationResult<Self> {
        if origin_floor == destination_floor {
            return Err(SimulationError::invalid_request(format!(
                "passenger origin and destination are both floor {origin_floor}"
            )));
        }

        Ok(Self { id: PassengerId::new(), origin_floor, destination_floor })
    }

    /// Travel direction implied by the origin/destination pair
    pub fn direction(&self) -> Direction {
        Direction::toward(self.origin_floor, self.destination_floor)
    }

    /// Sample a random travel request within a building of `floors` floors
    ///
    /// The origin is drawn uniformly from `0..floors` and the destination is
    /// redrawn until it differs from the origin. Needs at least two floors,
    /// otherwise no valid request exists.
    pub fn sample(floors: usize, rng: &mut impl Rng) -> SimulationResult<Self> {
        if floors < 2 {
            return Err(SimulationError::invalid_request(format!(
                "cannot sample a passenger in a building with {floors} floor(s)"
            )));
        }

        let origin_floor = rng.gen_range(0..floors);
        let mut destination_floor = rng.gen_range(0..floors);
        while destination_floor == origin_floor {
            destination_floor = rng.gen_range(0..floors);
        }

        Self::new(origin_floor, destination_floor)
    }
}
