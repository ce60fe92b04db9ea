//! The building, its elevator fleet, and its waiting queue
//!
//! A building owns the installed units and the queue of passengers no unit
//! has accepted yet. Provisioning, ingress, and observability all operate on
//! the fleet under one mutex; the recurring dispatch pass runs on the
//! building's own thread and shares that mutex.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Sender};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::building::dispatch::{self, run_dispatch_pass, DEFAULT_DISPATCH_INTERVAL};
use crate::elevator::{Elevator, ElevatorSnapshot};
use crate::passenger::Passenger;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::ElevatorStatus;

/// Installed units and the not-yet-assigned passengers
#[derive(Debug, Default)]
pub(crate) struct Fleet {
    /// Units in installation order
    pub(crate) elevators: Vec<Elevator>,
    /// Passengers awaiting assignment, in arrival order
    pub(crate) waiting: Vec<Passenger>,
}

/// A building with an elevator fleet and a recurring dispatch pass
///
/// The sole ingress for travel requests is [`Building::enqueue`]; the
/// dispatch pass moves accepted requests onto the unit that can reach them
/// soonest. Dropping the building disconnects the dispatcher's stop channel,
/// which ends its thread on the next wake-up.
#[derive(Debug)]
pub struct Building {
    floors: usize,
    fleet: Arc<Mutex<Fleet>>,
    dispatch_interval: Duration,
    stop_tx: Mutex<Option<Sender<()>>>,
}

/// Point-in-time observable state of a building and its fleet
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSnapshot {
    /// Number of floors
    pub floors: usize,
    /// Passengers awaiting assignment
    pub waiting: Vec<Passenger>,
    /// Per-unit snapshots in installation order
    pub elevators: Vec<ElevatorSnapshot>,
    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,
}

impl BuildingSnapshot {
    /// Passengers still waiting, assigned, or aboard somewhere in the system
    pub fn passengers_in_system(&self) -> usize {
        self.waiting.len()
            + self
                .elevators
                .iter()
                .map(|e| e.queue.len() + e.passengers.len())
                .sum::<usize>()
    }

    /// Total passengers delivered by the fleet so far
    pub fn passengers_delivered(&self) -> u64 {
        self.elevators.iter().map(|e| e.counters.passengers_delivered).sum()
    }
}

impl Building {
    /// Create a building with the given number of floors
    pub fn new(floors: usize) -> SimulationResult<Self> {
        if floors == 0 {
            return Err(SimulationError::invalid_request(
                "a building needs at least one floor",
            ));
        }

        Ok(Self {
            floors,
            fleet: Arc::new(Mutex::new(Fleet::default())),
            dispatch_interval: DEFAULT_DISPATCH_INTERVAL,
            stop_tx: Mutex::new(None),
        })
    }

    fn lock_fleet(&self) -> MutexGuard<'_, Fleet> {
        self.fleet.lock().expect("building fleet mutex poisoned")
    }

    fn lock_stop_tx(&self) -> MutexGuard<'_, Option<Sender<()>>> {
        self.stop_tx.lock().expect("building stop channel mutex poisoned")
    }

    /// Number of floors
    pub fn floors(&self) -> usize {
        self.floors
    }

    /// Highest serviceable floor
    pub fn max_floor(&self) -> usize {
        self.floors - 1
    }

    /// Interval between recurring dispatch passes
    pub fn dispatch_interval(&self) -> Duration {
        self.dispatch_interval
    }

    /// Change the dispatch interval; applies from the next start of operation
    pub fn set_dispatch_interval(&mut self, interval: Duration) {
        self.dispatch_interval = interval;
    }

    /// Number of installed units
    pub fn elevator_count(&self) -> usize {
        self.lock_fleet().elevators.len()
    }

    /// Handles to every installed unit, in installation order
    pub fn elevators(&self) -> Vec<Elevator> {
        self.lock_fleet().elevators.clone()
    }

    /// Passengers awaiting assignment, in arrival order
    pub fn waiting(&self) -> Vec<Passenger> {
        self.lock_fleet().waiting.clone()
    }

    /// Install a unit and fix its serviceable range to this building
    ///
    /// The building keeps a handle; clone yours before installing if you want
    /// to keep polling the unit. Installing while the building is already
    /// operating does not start the unit; start it explicitly.
    pub fn add_elevator(&self, elevator: Elevator) -> SimulationResult<()> {
        let mut fleet = self.lock_fleet();
        if fleet.elevators.iter().any(|e| e.id() == elevator.id()) {
            return Err(SimulationError::duplicate_elevator(elevator.id()));
        }

        elevator.set_max_floor(self.floors - 1);
        info!(elevator = %elevator.id(), capacity = elevator.capacity(), "elevator installed");
        fleet.elevators.push(elevator);
        Ok(())
    }

    /// Remove an installed unit from the fleet
    ///
    /// A stopped unit's not-yet-boarded assignments are reclaimed into the
    /// building queue for re-dispatch; passengers aboard stay on the removed
    /// unit. A unit removed while still running keeps serving its own
    /// passengers outside the fleet.
    pub fn remove_elevator(&self, elevator: &Elevator) -> SimulationResult<()> {
        let mut fleet = self.lock_fleet();
        let position = fleet
            .elevators
            .iter()
            .position(|e| e.id() == elevator.id())
            .ok_or_else(|| SimulationError::unknown_elevator(elevator.id()))?;
        let removed = fleet.elevators.remove(position);

        if removed.status() == ElevatorStatus::NotInService {
            let reclaimed = removed.drain_queue();
            if !reclaimed.is_empty() {
                info!(
                    elevator = %removed.id(),
                    reclaimed = reclaimed.len(),
                    "reclaimed assignments from removed unit"
                );
                fleet.waiting.extend(reclaimed);
            }
            let aboard = removed.passengers().len();
            if aboard > 0 {
                warn!(
                    elevator = %removed.id(),
                    aboard,
                    "removed unit still has passengers aboard"
                );
            }
        }

        info!(elevator = %removed.id(), "elevator removed");
        Ok(())
    }

    /// Accept a travel request into the building queue
    ///
    /// Rejects requests with either floor outside the building immediately;
    /// an out-of-range passenger could never be assigned to any unit.
    pub fn enqueue(&self, passenger: Passenger) -> SimulationResult<()> {
        let max_floor = self.max_floor();
        if passenger.origin_floor > max_floor || passenger.destination_floor > max_floor {
            return Err(SimulationError::invalid_request(format!(
                "passenger {} travels {} to {} but the building has floors 0 to {}",
                passenger.id, passenger.origin_floor, passenger.destination_floor, max_floor
            )));
        }

        let mut fleet = self.lock_fleet();
        fleet.waiting.push(passenger);
        debug!(
            passenger = %passenger.id,
            origin = passenger.origin_floor,
            destination = passenger.destination_floor,
            waiting = fleet.waiting.len(),
            "travel request received"
        );
        Ok(())
    }

    /// Run one dispatch pass right now, returning how many passengers were
    /// handed to a unit
    ///
    /// The recurring pass calls this on its own; it is public so hosts and
    /// tests can drive dispatch synchronously.
    pub fn dispatch_pass(&self) -> usize {
        run_dispatch_pass(&mut self.lock_fleet())
    }

    /// Start operation: bring every installed unit into service and launch
    /// the recurring dispatch pass
    ///
    /// A building already operating is left untouched.
    pub fn start_operation(&self) -> SimulationResult<()> {
        let mut stop_slot = self.lock_stop_tx();
        if stop_slot.is_some() {
            debug!("start requested but the building is already operating");
            return Ok(());
        }

        {
            let fleet = self.lock_fleet();
            for elevator in &fleet.elevators {
                elevator.start_operation()?;
            }
        }

        let (stop_tx, stop_rx) = bounded(1);
        dispatch::spawn(Arc::clone(&self.fleet), self.dispatch_interval, stop_rx)?;
        *stop_slot = Some(stop_tx);

        info!(floors = self.floors, "building operation started");
        Ok(())
    }

    /// Stop operation: halt the dispatch pass and take every installed unit
    /// out of service
    ///
    /// Waiting and assigned passengers stay where they are. Idempotent.
    pub fn stop_operation(&self) {
        if let Some(stop_tx) = self.lock_stop_tx().take() {
            let _ = stop_tx.send(());
        }

        let fleet = self.lock_fleet();
        for elevator in &fleet.elevators {
            elevator.stop_operation();
        }

        info!("building operation stopped");
    }

    /// One consistent view of the building and every installed unit
    pub fn snapshot(&self) -> BuildingSnapshot {
        let fleet = self.lock_fleet();
        BuildingSnapshot {
            floors: self.floors,
            waiting: fleet.waiting.clone(),
            elevators: fleet.elevators.iter().map(Elevator::snapshot).collect(),
            captured_at: Utc::now(),
        }
    }
}
