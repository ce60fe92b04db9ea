//! Building-level dispatch
//!
//! The dispatch pass walks the unassigned queue in arrival order and hands
//! each passenger to the installed unit reporting the lowest arrival-time
//! estimate. Unreachable passengers simply stay queued for the next pass, as
//! does anyone whose hand-off fails because the chosen unit stopped between
//! the estimate and the transfer. A recurring pass runs on the building's own
//! dispatcher thread, independent of every elevator's timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, info, warn};

use crate::building::fleet::Fleet;
use crate::elevator::Elevator;
use crate::passenger::Passenger;

/// Interval between recurring dispatch passes
pub(crate) const DEFAULT_DISPATCH_INTERVAL: Duration = Duration::from_millis(1_000);

/// Run one dispatch pass over the fleet, returning how many passengers were
/// handed to a unit
pub(crate) fn run_dispatch_pass(fleet: &mut Fleet) -> usize {
    let mut assigned = 0;
    let pending = std::mem::take(&mut fleet.waiting);

    for passenger in pending {
        match select_unit(&fleet.elevators, &passenger) {
            Some((elevator, eta)) => match elevator.enqueue(passenger) {
                Ok(()) => {
                    info!(
                        passenger = %passenger.id,
                        elevator = %elevator.id(),
                        origin = passenger.origin_floor,
                        destination = passenger.destination_floor,
                        eta_ms = eta.as_millis() as u64,
                        "passenger assigned"
                    );
                    assigned += 1;
                }
                Err(err) => {
                    warn!(
                        passenger = %passenger.id,
                        elevator = %elevator.id(),
                        error = %err,
                        "hand-off failed, passenger stays queued"
                    );
                    fleet.waiting.push(passenger);
                }
            },
            None => {
                debug!(
                    passenger = %passenger.id,
                    origin = passenger.origin_floor,
                    "no unit can serve passenger this pass"
                );
                fleet.waiting.push(passenger);
            }
        }
    }

    assigned
}

/// Pick the unit with the lowest arrival-time estimate for this passenger
///
/// Units reporting the unreachable sentinel are skipped; ties keep the first
/// unit in installation order.
fn select_unit<'a>(
    elevators: &'a [Elevator],
    passenger: &Passenger,
) -> Option<(&'a Elevator, Duration)> {
    let mut best: Option<(&Elevator, Duration)> = None;

    for elevator in elevators {
        if let Some(eta) = elevator.arriving_time_for(passenger) {
            let better = best.map_or(true, |(_, current)| eta < current);
            if better {
                best = Some((elevator, eta));
            }
        }
    }

    best
}

/// Spawn the recurring dispatch pass on its own thread
///
/// The thread holds only the fleet mutex; it ends on a stop signal or once
/// the building itself is dropped and the channel disconnects.
pub(crate) fn spawn(
    fleet: Arc<Mutex<Fleet>>,
    interval: Duration,
    stop_rx: Receiver<()>,
) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("building-dispatch".to_string())
        .spawn(move || run(fleet, interval, stop_rx))
        .map(|_| ())
}

fn run(fleet: Arc<Mutex<Fleet>>, interval: Duration, stop_rx: Receiver<()>) {
    debug!("dispatch loop started");
    loop {
        {
            let mut fleet = fleet.lock().expect("building fleet mutex poisoned");
            run_dispatch_pass(&mut fleet);
        }
        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    debug!("dispatch loop stopped");
}
