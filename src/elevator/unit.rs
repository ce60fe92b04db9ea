//! The elevator unit and its public handle
//!
//! [`Elevator`] is a cheap cloneable handle to one car. The car's mutable
//! state sits behind a mutex so the worker loop, admission calls, and
//! dispatcher cost queries all see consistent state. Starting a unit spawns
//! its scheduling loop on a named thread; stopping signals the loop over the
//! unit's stop channel without waiting for an in-flight delay to finish.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crossbeam_channel::{bounded, Sender};
use tracing::{debug, info};

use crate::elevator::state::{CarState, DriveState, ElevatorSnapshot, ServiceCounters};
use crate::elevator::worker::{self, WorkerContext};
use crate::passenger::Passenger;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Direction, ElevatorId, ElevatorStatus};

/// A single elevator car and its autonomous scheduling loop
///
/// Handles are reference-counted: clone one to keep polling a unit that has
/// been handed to a building. Dropping every handle disconnects the stop
/// channel, which ends the worker thread on its next wake-up.
#[derive(Debug, Clone)]
pub struct Elevator {
    shared: Arc<ElevatorShared>,
}

#[derive(Debug)]
struct ElevatorShared {
    id: ElevatorId,
    capacity: usize,
    floor_speed: Duration,
    loading_speed: Duration,
    state: Arc<Mutex<CarState>>,
    stop_tx: Mutex<Option<Sender<()>>>,
}

impl ElevatorShared {
    fn lock_state(&self) -> MutexGuard<'_, CarState> {
        self.state.lock().expect("elevator state mutex poisoned")
    }

    fn lock_stop_tx(&self) -> MutexGuard<'_, Option<Sender<()>>> {
        self.stop_tx.lock().expect("elevator stop channel mutex poisoned")
    }
}

impl Elevator {
    /// Create a new unit with the given manufacture-time specs
    ///
    /// The unit starts out of service at floor 0. Its serviceable floor range
    /// is fixed by the building that installs it.
    pub fn new(capacity: usize, floor_speed: Duration, loading_speed: Duration) -> Self {
        Self {
            shared: Arc::new(ElevatorShared {
                id: ElevatorId::new(),
                capacity,
                floor_speed,
                loading_speed,
                state: Arc::new(Mutex::new(CarState::new())),
                stop_tx: Mutex::new(None),
            }),
        }
    }

    /// Default-spec unit: 10 seats, one second per floor, two seconds per stop
    pub fn sample() -> Self {
        Self::new(10, Duration::from_secs(1), Duration::from_secs(2))
    }

    /// Unique identifier of this unit
    pub fn id(&self) -> ElevatorId {
        self.shared.id
    }

    /// Passenger capacity
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Time to travel one floor
    pub fn floor_speed(&self) -> Duration {
        self.shared.floor_speed
    }

    /// Time spent loading at a stop
    pub fn loading_speed(&self) -> Duration {
        self.shared.loading_speed
    }

    /// Current status
    pub fn status(&self) -> ElevatorStatus {
        self.shared.lock_state().drive.status()
    }

    /// Current travel direction, if one is defined
    pub fn direction(&self) -> Option<Direction> {
        self.shared.lock_state().drive.direction()
    }

    /// Current floor
    pub fn floor(&self) -> usize {
        self.shared.lock_state().floor
    }

    /// Highest floor this unit may serve
    pub fn max_floor(&self) -> usize {
        self.shared.lock_state().max_floor
    }

    /// Passengers currently aboard
    pub fn passengers(&self) -> Vec<Passenger> {
        self.shared.lock_state().passengers.clone()
    }

    /// Assigned passengers not yet aboard
    pub fn queue(&self) -> Vec<Passenger> {
        self.shared.lock_state().queue.clone()
    }

    /// Service counters accumulated so far
    pub fn counters(&self) -> ServiceCounters {
        self.shared.lock_state().counters
    }

    /// One consistent view of the whole unit under a single lock
    pub fn snapshot(&self) -> ElevatorSnapshot {
        let state = self.shared.lock_state();
        ElevatorSnapshot {
            id: self.shared.id,
            status: state.drive.status(),
            direction: state.drive.direction(),
            floor: state.floor,
            passengers: state.passengers.clone(),
            queue: state.queue.clone(),
            counters: state.counters,
        }
    }

    /// Change the idle poll interval
    ///
    /// Takes effect from the next idle tick; mostly useful for speeding up
    /// demos and tests.
    pub fn set_idle_poll(&self, interval: Duration) {
        self.shared.lock_state().idle_poll = interval;
    }

    /// Fix the highest serviceable floor; called by the installing building
    pub(crate) fn set_max_floor(&self, max_floor: usize) {
        self.shared.lock_state().max_floor = max_floor;
    }

    /// Bring the unit into service and launch its scheduling loop
    ///
    /// A unit that is already in service is left untouched.
    pub fn start_operation(&self) -> SimulationResult<()> {
        let mut state = self.shared.lock_state();
        if !matches!(state.drive, DriveState::OutOfService) {
            debug!(elevator = %self.shared.id, "start requested but unit is already in service");
            return Ok(());
        }
        state.drive = DriveState::Idle;
        drop(state);

        let (stop_tx, stop_rx) = bounded(1);
        let ctx = WorkerContext {
            id: self.shared.id,
            capacity: self.shared.capacity,
            floor_speed: self.shared.floor_speed,
            loading_speed: self.shared.loading_speed,
            state: Arc::clone(&self.shared.state),
        };
        if let Err(err) = worker::spawn(ctx, stop_rx) {
            self.shared.lock_state().drive = DriveState::OutOfService;
            return Err(err.into());
        }
        *self.shared.lock_stop_tx() = Some(stop_tx);

        info!(elevator = %self.shared.id, "elevator entered service");
        Ok(())
    }

    /// Take the unit out of service immediately
    ///
    /// The scheduling loop is woken and exits without finishing any pending
    /// travel or loading delay. Passengers aboard and queued stay in place
    /// and resume service if the unit is started again. Stopping an already
    /// stopped unit is a no-op.
    pub fn stop_operation(&self) {
        let mut state = self.shared.lock_state();
        if matches!(state.drive, DriveState::OutOfService) {
            debug!(elevator = %self.shared.id, "stop requested but unit is already out of service");
            return;
        }
        state.drive = DriveState::OutOfService;
        drop(state);

        if let Some(stop_tx) = self.shared.lock_stop_tx().take() {
            let _ = stop_tx.send(());
        }

        info!(elevator = %self.shared.id, "elevator taken out of service");
    }

    /// Assign a passenger to this unit
    ///
    /// Fails with `OutOfService` when the unit is stopped and with
    /// `InvalidRequest` when either floor lies outside the installed range.
    /// Accepted passengers join the back of the assignment queue; the
    /// scheduling loop picks them up on its own.
    pub fn enqueue(&self, passenger: Passenger) -> SimulationResult<()> {
        let mut state = self.shared.lock_state();
        if matches!(state.drive, DriveState::OutOfService) {
            return Err(SimulationError::out_of_service(self.shared.id));
        }
        if passenger.origin_floor > state.max_floor
            || passenger.destination_floor > state.max_floor
        {
            return Err(SimulationError::invalid_request(format!(
                "passenger {} travels {} to {} but this unit serves floors 0 to {}",
                passenger.id, passenger.origin_floor, passenger.destination_floor, state.max_floor
            )));
        }

        state.queue.push(passenger);
        debug!(
            elevator = %self.shared.id,
            passenger = %passenger.id,
            origin = passenger.origin_floor,
            destination = passenger.destination_floor,
            queued = state.queue.len(),
            "passenger assigned to unit"
        );
        Ok(())
    }

    /// Estimated time for this unit to reach a waiting passenger
    ///
    /// `None` is the unreachable sentinel: the unit is out of service, full,
    /// or its current trip cannot pass the passenger's origin in the right
    /// direction. A unit loading at the passenger's origin with a seat free
    /// and a compatible direction reports zero, the doors are already open.
    /// Never mutates state.
    pub fn arriving_time_for(&self, passenger: &Passenger) -> Option<Duration> {
        let state = self.shared.lock_state();
        let distance = state.floor.abs_diff(passenger.origin_floor) as u32;

        match state.drive {
            DriveState::OutOfService => None,
            DriveState::Idle => Some(self.shared.floor_speed * distance),
            DriveState::Moving { direction } => {
                if state.passengers.len() == self.shared.capacity {
                    return None;
                }
                if direction != passenger.direction() {
                    return None;
                }
                let approaching = match direction {
                    Direction::Up => state.floor < passenger.origin_floor,
                    Direction::Down => state.floor > passenger.origin_floor,
                };
                approaching.then(|| self.shared.floor_speed * distance)
            }
            DriveState::Loading { direction } => {
                if state.passengers.len() == self.shared.capacity {
                    return None;
                }
                let compatible = direction.map_or(true, |d| d == passenger.direction());
                if state.floor == passenger.origin_floor {
                    return compatible.then_some(Duration::ZERO);
                }
                let direction = direction?;
                if direction != passenger.direction() {
                    return None;
                }
                let approaching = match direction {
                    Direction::Up => state.floor < passenger.origin_floor,
                    Direction::Down => state.floor > passenger.origin_floor,
                };
                approaching.then(|| self.shared.floor_speed * distance)
            }
        }
    }

    /// Remove and return every not-yet-boarded assignment
    ///
    /// Used by the building when reclaiming the queue of a removed unit.
    pub(crate) fn drain_queue(&self) -> Vec<Passenger> {
        std::mem::take(&mut self.shared.lock_state().queue)
    }

    #[cfg(test)]
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut CarState) -> R) -> R {
        f(&mut self.shared.lock_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed_sample() -> Elevator {
        let elevator = Elevator::sample();
        elevator.set_max_floor(9);
        elevator
    }

    #[test]
    fn test_new_elevator_defaults() {
        let elevator = Elevator::new(4, Duration::from_millis(50), Duration::from_millis(80));

        assert_eq!(elevator.capacity(), 4);
        assert_eq!(elevator.floor_speed(), Duration::from_millis(50));
        assert_eq!(elevator.loading_speed(), Duration::from_millis(80));
        assert_eq!(elevator.status(), ElevatorStatus::NotInService);
        assert_eq!(elevator.direction(), None);
        assert_eq!(elevator.floor(), 0);
        assert!(elevator.passengers().is_empty());
        assert!(elevator.queue().is_empty());
    }

    #[test]
    fn test_sample_elevator_specs() {
        let elevator = Elevator::sample();

        assert_eq!(elevator.capacity(), 10);
        assert_eq!(elevator.floor_speed(), Duration::from_secs(1));
        assert_eq!(elevator.loading_speed(), Duration::from_secs(2));
    }

    #[test]
    fn test_handles_share_one_unit() {
        let elevator = installed_sample();
        let handle = elevator.clone();

        elevator.with_state(|s| s.floor = 7);

        assert_eq!(handle.id(), elevator.id());
        assert_eq!(handle.floor(), 7);
    }

    #[test]
    fn test_enqueue_rejected_while_out_of_service() {
        let elevator = installed_sample();
        let passenger = Passenger::new(0, 5).unwrap();

        match elevator.enqueue(passenger) {
            Err(SimulationError::OutOfService(id)) => assert_eq!(id, elevator.id()),
            other => panic!("Expected OutOfService, got {other:?}"),
        }
    }

    #[test]
    fn test_enqueue_rejects_floors_outside_installed_range() {
        let elevator = installed_sample();
        elevator.with_state(|s| s.drive = DriveState::Idle);

        let too_high = Passenger::new(0, 10).unwrap();
        assert!(matches!(
            elevator.enqueue(too_high),
            Err(SimulationError::InvalidRequest(_))
        ));

        let in_range = Passenger::new(0, 9).unwrap();
        assert!(elevator.enqueue(in_range).is_ok());
        assert_eq!(elevator.queue().len(), 1);
    }

    #[test]
    fn test_start_and_stop_operation() {
        let elevator = installed_sample();

        elevator.start_operation().unwrap();
        assert_eq!(elevator.status(), ElevatorStatus::Idle);

        // Starting an in-service unit changes nothing.
        elevator.start_operation().unwrap();
        assert_eq!(elevator.status(), ElevatorStatus::Idle);

        elevator.stop_operation();
        assert_eq!(elevator.status(), ElevatorStatus::NotInService);
    }

    #[test]
    fn test_stop_operation_is_idempotent() {
        let elevator = installed_sample();
        elevator.start_operation().unwrap();
        elevator.stop_operation();

        let before = elevator.snapshot();
        elevator.stop_operation();
        let after = elevator.snapshot();

        assert_eq!(after.status, ElevatorStatus::NotInService);
        assert_eq!(after.floor, before.floor);
        assert_eq!(after.counters, before.counters);
    }

    #[test]
    fn test_stop_preserves_passengers_and_queue() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 3;
            s.passengers = vec![Passenger::new(1, 6).unwrap()];
            s.queue = vec![Passenger::new(5, 8).unwrap()];
        });

        elevator.stop_operation();

        assert_eq!(elevator.status(), ElevatorStatus::NotInService);
        assert_eq!(elevator.passengers().len(), 1);
        assert_eq!(elevator.queue().len(), 1);
    }

    #[test]
    fn test_arriving_time_out_of_service_is_unreachable() {
        let elevator = installed_sample();
        let passenger = Passenger::new(2, 5).unwrap();

        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_idle_is_distance_times_floor_speed() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Idle;
            s.floor = 2;
        });

        let passenger = Passenger::new(5, 1).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_arriving_time_moving_toward_compatible_passenger() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 3;
            s.passengers = vec![Passenger::new(0, 9).unwrap()];
        });

        let passenger = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_arriving_time_moving_away_is_unreachable() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Down };
            s.floor = 3;
        });

        let passenger = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_wrong_direction_is_unreachable() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 3;
        });

        let passenger = Passenger::new(5, 2).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_already_passed_is_unreachable() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 6;
        });

        let passenger = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), None);

        // The approach check is strict: a mover at exactly the origin floor
        // has already made its stop decision for that floor.
        elevator.with_state(|s| s.floor = 5);
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_full_unit_is_unreachable() {
        let elevator = Elevator::new(1, Duration::from_secs(1), Duration::from_secs(2));
        elevator.set_max_floor(9);
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 3;
            s.passengers = vec![Passenger::new(0, 9).unwrap()];
        });

        let passenger = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_loading_at_origin_is_zero() {
        let elevator = installed_sample();
        let passenger = Passenger::new(5, 8).unwrap();

        elevator.with_state(|s| {
            s.drive = DriveState::Loading { direction: Some(Direction::Up) };
            s.floor = 5;
        });
        assert_eq!(elevator.arriving_time_for(&passenger), Some(Duration::ZERO));

        // Doors opened from idle carry no direction, which is compatible.
        elevator.with_state(|s| s.drive = DriveState::Loading { direction: None });
        assert_eq!(elevator.arriving_time_for(&passenger), Some(Duration::ZERO));

        // An incompatible stop direction at the origin stays unreachable.
        elevator.with_state(|s| {
            s.drive = DriveState::Loading { direction: Some(Direction::Down) }
        });
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_loading_at_origin_but_full_is_unreachable() {
        let elevator = Elevator::new(1, Duration::from_secs(1), Duration::from_secs(2));
        elevator.set_max_floor(9);
        elevator.with_state(|s| {
            s.drive = DriveState::Loading { direction: Some(Direction::Up) };
            s.floor = 5;
            s.passengers = vec![Passenger::new(0, 9).unwrap()];
        });

        let passenger = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&passenger), None);
    }

    #[test]
    fn test_arriving_time_loading_elsewhere_follows_moving_rules() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Loading { direction: Some(Direction::Up) };
            s.floor = 3;
        });

        let ahead = Passenger::new(5, 8).unwrap();
        assert_eq!(elevator.arriving_time_for(&ahead), Some(Duration::from_secs(2)));

        let behind = Passenger::new(1, 4).unwrap();
        assert_eq!(elevator.arriving_time_for(&behind), None);

        // A directionless stop away from the origin cannot promise anything.
        elevator.with_state(|s| s.drive = DriveState::Loading { direction: None });
        assert_eq!(elevator.arriving_time_for(&ahead), None);
    }

    #[test]
    fn test_snapshot_is_coherent() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.drive = DriveState::Moving { direction: Direction::Up };
            s.floor = 4;
            s.passengers = vec![Passenger::new(1, 6).unwrap()];
            s.counters.floors_travelled = 3;
        });

        let snapshot = elevator.snapshot();

        assert_eq!(snapshot.id, elevator.id());
        assert_eq!(snapshot.status, ElevatorStatus::Moving);
        assert_eq!(snapshot.direction, Some(Direction::Up));
        assert_eq!(snapshot.floor, 4);
        assert_eq!(snapshot.passengers.len(), 1);
        assert_eq!(snapshot.counters.floors_travelled, 3);
    }

    #[test]
    fn test_drain_queue_empties_assignments() {
        let elevator = installed_sample();
        elevator.with_state(|s| {
            s.queue = vec![Passenger::new(1, 4).unwrap(), Passenger::new(2, 7).unwrap()];
        });

        let reclaimed = elevator.drain_queue();

        assert_eq!(reclaimed.len(), 2);
        assert!(elevator.queue().is_empty());
    }
}
