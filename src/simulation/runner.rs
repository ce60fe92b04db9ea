//! Simulation runner
//!
//! This module wires a building and its fleet together from a
//! [`SimulationConfig`], feeds sampled passengers into the system, and waits
//! for the fleet to deliver them.

use std::thread;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::building::Building;
use crate::elevator::Elevator;
use crate::passenger::Passenger;
use crate::simulation::error::SimulationResult;
use crate::simulation::statistics::SimulationStatistics;
use crate::types::SimulationConfig;

/// Cadence at which the runner polls the building for completion
const SNAPSHOT_POLL: Duration = Duration::from_millis(100);

/// Drives a full simulation run from a configuration
#[derive(Debug)]
pub struct SimulationRunner {
    /// Configuration for the simulation
    config: SimulationConfig,
    /// Random number generator with optional seed
    rng: StdRng,
}

impl SimulationRunner {
    /// Create a new runner from a validated configuration
    #[instrument(skip(config), fields(floors = config.floors, elevators = config.elevator_count))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        Ok(Self { config, rng })
    }

    /// Get the configuration this runner was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation to completion and return its statistics
    ///
    /// Builds the building and fleet, starts operation, feeds sampled
    /// passengers at jittered arrival intervals, then polls until every
    /// passenger is delivered or the run timeout elapses.
    #[instrument(skip(self), fields(passengers = self.config.passenger_count))]
    pub fn run(mut self) -> SimulationResult<SimulationStatistics> {
        let building = self.build_building()?;
        let requested = self.config.passenger_count;

        info!(
            "Starting simulation: {} floors, {} elevators, {} passengers",
            self.config.floors, self.config.elevator_count, requested
        );

        building.start_operation()?;
        let started = Instant::now();
        let deadline = started + self.config.run_timeout();

        for remaining in (0..requested).rev() {
            let passenger = Passenger::sample(self.config.floors, &mut self.rng)?;
            debug!(
                passenger_id = %passenger.id,
                origin = passenger.origin_floor,
                destination = passenger.destination_floor,
                "Passenger arrived"
            );
            building.enqueue(passenger)?;

            if remaining > 0 {
                thread::sleep(self.jittered_arrival_wait());
            }
        }

        let completed = self.wait_for_deliveries(&building, requested, deadline);
        building.stop_operation();

        let duration = started.elapsed();
        let statistics =
            SimulationStatistics::from_snapshot(&building.snapshot(), requested, duration);

        if completed {
            info!("{}", statistics.generate_compact_summary());
        } else {
            warn!(
                "Run timed out after {:.2}s with {} passengers pending",
                duration.as_secs_f64(),
                statistics.passengers_pending
            );
        }

        Ok(statistics)
    }

    /// Assemble the building and its fleet from the configuration
    fn build_building(&self) -> SimulationResult<Building> {
        let mut building = Building::new(self.config.floors)?;
        building.set_dispatch_interval(self.config.dispatch_interval());

        for _ in 0..self.config.elevator_count {
            let unit = Elevator::new(
                self.config.elevator_capacity,
                self.config.floor_travel(),
                self.config.loading_time(),
            );
            unit.set_idle_poll(self.config.idle_poll());
            building.add_elevator(unit)?;
        }

        Ok(building)
    }

    /// Pick the next wait between passenger arrivals, jittered around the
    /// configured interval
    fn jittered_arrival_wait(&mut self) -> Duration {
        let base = self.config.arrival_interval_ms;
        Duration::from_millis(self.rng.gen_range(base / 2..=base + base / 2))
    }

    /// Poll the building until all requested passengers are delivered or the
    /// deadline passes, returning whether the run completed
    fn wait_for_deliveries(
        &self,
        building: &Building,
        requested: usize,
        deadline: Instant,
    ) -> bool {
        loop {
            let snapshot = building.snapshot();
            if snapshot.passengers_delivered() as usize >= requested {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(SNAPSHOT_POLL.min(self.config.dispatch_interval()));
        }
    }
}
