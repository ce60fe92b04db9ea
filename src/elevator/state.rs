//! Run-time state of a single elevator car
//!
//! The drive state is a tagged union so that a travel direction only exists
//! in the states that define one. Everything mutable about a car lives in
//! [`CarState`] behind the unit's mutex; the serializable view handed to
//! observers is [`ElevatorSnapshot`].

use std::time::Duration;

use serde::Serialize;

use crate::passenger::Passenger;
use crate::types::{Direction, ElevatorId, ElevatorStatus};

/// Poll interval an idle car waits between queue checks
pub(crate) const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(1_000);

/// Drive state of a car, direction attached only where it is defined
///
/// `Loading` keeps the direction the stop was entered with (`None` when the
/// doors opened from idle) because both the boarding filter and arrival-time
/// estimation read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DriveState {
    /// Halted; the scheduling loop is not running
    OutOfService,
    /// In service with nothing to do
    Idle,
    /// Travelling one floor at a time in `direction`
    Moving {
        /// Current travel direction
        direction: Direction,
    },
    /// Doors open, exchanging passengers at the current floor
    Loading {
        /// Direction the stop was entered with, if any
        direction: Option<Direction>,
    },
}

impl DriveState {
    /// Status label for this drive state
    pub(crate) fn status(&self) -> ElevatorStatus {
        match self {
            Self::OutOfService => ElevatorStatus::NotInService,
            Self::Idle => ElevatorStatus::Idle,
            Self::Moving { .. } => ElevatorStatus::Moving,
            Self::Loading { .. } => ElevatorStatus::Loading,
        }
    }

    /// Travel direction, if the current state defines one
    pub(crate) fn direction(&self) -> Option<Direction> {
        match self {
            Self::OutOfService | Self::Idle => None,
            Self::Moving { direction } => Some(*direction),
            Self::Loading { direction } => *direction,
        }
    }
}

/// Monotonic per-car service counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCounters {
    /// Single-floor movements completed
    pub floors_travelled: u64,
    /// Loading stops completed
    pub stops: u64,
    /// Passengers taken aboard
    pub passengers_boarded: u64,
    /// Passengers delivered to their destination
    pub passengers_delivered: u64,
}

/// Mutable state of one car, shared between its handle and its worker
#[derive(Debug)]
pub(crate) struct CarState {
    /// Highest floor the car may serve, fixed by the installing building
    pub(crate) max_floor: usize,
    /// Current floor, or the next floor being approached while moving
    pub(crate) floor: usize,
    /// Drive state
    pub(crate) drive: DriveState,
    /// Passengers aboard, len never exceeds the car's capacity
    pub(crate) passengers: Vec<Passenger>,
    /// Assigned passengers not yet aboard, in assignment order
    pub(crate) queue: Vec<Passenger>,
    /// Service counters
    pub(crate) counters: ServiceCounters,
    /// Poll interval while idle
    pub(crate) idle_poll: Duration,
}

impl CarState {
    /// Fresh car state at the ground floor, out of service
    pub(crate) fn new() -> Self {
        Self {
            max_floor: 0,
            floor: 0,
            drive: DriveState::OutOfService,
            passengers: Vec::new(),
            queue: Vec::new(),
            counters: ServiceCounters::default(),
            idle_poll: DEFAULT_IDLE_POLL,
        }
    }
}

/// Point-in-time observable state of one elevator
#[derive(Debug, Clone, Serialize)]
pub struct ElevatorSnapshot {
    /// Unit identifier
    pub id: ElevatorId,
    /// Current status
    pub status: ElevatorStatus,
    /// Current travel direction, if one is defined
    pub direction: Option<Direction>,
    /// Current floor
    pub floor: usize,
    /// Passengers aboard
    pub passengers: Vec<Passenger>,
    /// Assigned passengers not yet aboard
    pub queue: Vec<Passenger>,
    /// Service counters
    pub counters: ServiceCounters,
}
