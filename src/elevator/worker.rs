//! Autonomous scheduling loop of a single car
//!
//! Each car in service owns one worker thread. The thread is a
//! self-rescheduling timer: every step performs the effect of the delay that
//! just elapsed (a floor of travel, a completed loading stop, an idle poll),
//! decides the next drive state, and returns the delay appropriate to it. The
//! wait itself is a `recv_timeout` on the unit's stop channel, so a stop
//! signal, or every handle to the unit being dropped, wakes the loop
//! immediately instead of after the pending delay.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::debug;

use crate::elevator::boarding::eligible_boarders;
use crate::elevator::state::{CarState, DriveState};
use crate::types::{Direction, ElevatorId};

/// Outcome of one scheduling step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Re-arm the timer with this delay
    Wait(Duration),
    /// Evaluate again without waiting
    Continue,
    /// Leave the loop
    Exit,
}

/// Everything a worker thread needs, detached from the public handle
///
/// The context deliberately holds only the state mutex, not the shared unit
/// struct, so a worker keeps nothing alive that would stop the unit's stop
/// channel from disconnecting once every handle is dropped.
#[derive(Debug)]
pub(crate) struct WorkerContext {
    pub(crate) id: ElevatorId,
    pub(crate) capacity: usize,
    pub(crate) floor_speed: Duration,
    pub(crate) loading_speed: Duration,
    pub(crate) state: Arc<Mutex<CarState>>,
}

impl WorkerContext {
    fn lock_state(&self) -> MutexGuard<'_, CarState> {
        self.state.lock().expect("elevator state mutex poisoned")
    }

    /// Perform one scheduling step and report how to continue
    pub(crate) fn step(&self) -> Step {
        let mut state = self.lock_state();
        match state.drive {
            DriveState::OutOfService => Step::Exit,
            DriveState::Idle => self.tick_idle(&mut state),
            DriveState::Moving { direction } => self.advance_floor(&mut state, direction),
            DriveState::Loading { direction } => self.finish_loading(&mut state, direction),
        }
    }

    /// Idle poll: open doors for a same-floor waiter, depart toward the first
    /// assignment, or keep idling
    fn tick_idle(&self, state: &mut CarState) -> Step {
        let Some(first) = state.queue.first().copied() else {
            return Step::Wait(state.idle_poll);
        };

        if state.queue.iter().any(|p| p.origin_floor == state.floor) {
            debug!(elevator = %self.id, floor = state.floor, "opening doors for waiting passenger");
            state.drive = DriveState::Loading { direction: None };
            return Step::Wait(self.loading_speed);
        }

        let direction = Direction::toward(state.floor, first.origin_floor);
        debug!(
            elevator = %self.id,
            floor = state.floor,
            target = first.origin_floor,
            %direction,
            "departing toward first assignment"
        );
        state.drive = DriveState::Moving { direction };
        Step::Wait(self.floor_speed)
    }

    /// A floor of travel has elapsed: move one floor and decide whether the
    /// new floor is a stop
    ///
    /// The stop decision has no capacity check: a full car still stops for an
    /// eligible waiter, who then stays queued if no seat frees up here.
    fn advance_floor(&self, state: &mut CarState, direction: Direction) -> Step {
        match direction {
            Direction::Up => state.floor += 1,
            Direction::Down => state.floor = state.floor.saturating_sub(1),
        }
        state.counters.floors_travelled += 1;

        let rider_stop = state.passengers.iter().any(|p| p.destination_floor == state.floor);
        let waiter_stop = !eligible_boarders(
            &state.queue,
            state.floor,
            Some(direction),
            state.passengers.is_empty(),
        )
        .is_empty();

        if rider_stop || waiter_stop {
            debug!(
                elevator = %self.id,
                floor = state.floor,
                rider_stop,
                waiter_stop,
                "stopping at floor"
            );
            state.drive = DriveState::Loading { direction: Some(direction) };
            Step::Wait(self.loading_speed)
        } else {
            Step::Wait(self.floor_speed)
        }
    }

    /// The loading delay has elapsed: unload arrivals, board eligible waiters
    /// up to capacity, then resume toward the first remaining rider or idle
    fn finish_loading(&self, state: &mut CarState, direction: Option<Direction>) -> Step {
        let floor = state.floor;

        let aboard_before = state.passengers.len();
        state.passengers.retain(|p| p.destination_floor != floor);
        let delivered = aboard_before - state.passengers.len();
        state.counters.passengers_delivered += delivered as u64;

        // Eligibility is decided once, against the cab as the unload left it.
        let eligible =
            eligible_boarders(&state.queue, floor, direction, state.passengers.is_empty());
        let mut boarded = Vec::new();
        for index in eligible {
            if state.passengers.len() >= self.capacity {
                break;
            }
            let passenger = state.queue[index];
            state.passengers.push(passenger);
            boarded.push(passenger.id);
        }
        state.queue.retain(|p| !boarded.contains(&p.id));
        state.counters.passengers_boarded += boarded.len() as u64;
        state.counters.stops += 1;

        if delivered > 0 || !boarded.is_empty() {
            debug!(
                elevator = %self.id,
                floor,
                delivered,
                boarded = boarded.len(),
                aboard = state.passengers.len(),
                "passenger exchange complete"
            );
        }

        match state.passengers.first() {
            None => {
                state.drive = DriveState::Idle;
                Step::Continue
            }
            Some(first) => {
                let direction = Direction::toward(floor, first.destination_floor);
                state.drive = DriveState::Moving { direction };
                Step::Wait(self.floor_speed)
            }
        }
    }
}

/// Spawn the scheduling loop on its own named thread
pub(crate) fn spawn(ctx: WorkerContext, stop_rx: Receiver<()>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name(format!("elevator-{}", ctx.id))
        .spawn(move || run(ctx, stop_rx))
        .map(|_| ())
}

fn run(ctx: WorkerContext, stop_rx: Receiver<()>) {
    debug!(elevator = %ctx.id, "scheduling loop started");
    loop {
        let delay = match ctx.step() {
            Step::Exit => break,
            Step::Continue => continue,
            Step::Wait(delay) => delay,
        };
        match stop_rx.recv_timeout(delay) {
            // A stop signal or a dropped sender ends the loop at once; the
            // timer only ever resumes on timeout.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    debug!(elevator = %ctx.id, "scheduling loop stopped");
}
