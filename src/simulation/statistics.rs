//! Statistics collection and reporting
//!
//! This module summarizes a finished simulation run from the final building
//! snapshot and the per-car service counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::building::BuildingSnapshot;
use crate::elevator::ServiceCounters;
use crate::simulation::error::SimulationResult;
use crate::types::ElevatorId;

/// Final service figures for a single elevator
#[derive(Debug, Clone, Serialize)]
pub struct ElevatorReport {
    /// Identifier of the elevator
    pub id: ElevatorId,
    /// Floor the car ended the run on
    pub final_floor: usize,
    /// Service counters accumulated over the run
    pub counters: ServiceCounters,
}

/// Aggregated statistics for a completed simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStatistics {
    /// Number of floors in the simulated building
    pub floors: usize,
    /// Number of elevators serving the building
    pub elevator_count: usize,
    /// Number of travel requests fed into the building
    pub passengers_requested: usize,
    /// Number of passengers delivered to their destination
    pub passengers_delivered: usize,
    /// Number of passengers still waiting, assigned, or aboard at the end
    pub passengers_pending: usize,
    /// Floors travelled by all cars combined
    pub total_floors_travelled: u64,
    /// Loading stops made by all cars combined
    pub total_stops: u64,
    /// Wall-clock duration of the run
    pub simulation_duration: Duration,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
    /// Per-elevator breakdown
    pub elevators: Vec<ElevatorReport>,
}

impl SimulationStatistics {
    /// Build run statistics from the final building snapshot
    pub fn from_snapshot(
        snapshot: &BuildingSnapshot,
        passengers_requested: usize,
        simulation_duration: Duration,
    ) -> Self {
        let elevators: Vec<ElevatorReport> = snapshot
            .elevators
            .iter()
            .map(|unit| ElevatorReport {
                id: unit.id,
                final_floor: unit.floor,
                counters: unit.counters,
            })
            .collect();

        Self {
            floors: snapshot.floors,
            elevator_count: elevators.len(),
            passengers_requested,
            passengers_delivered: snapshot.passengers_delivered() as usize,
            passengers_pending: snapshot.passengers_in_system(),
            total_floors_travelled: elevators
                .iter()
                .map(|unit| unit.counters.floors_travelled)
                .sum(),
            total_stops: elevators.iter().map(|unit| unit.counters.stops).sum(),
            simulation_duration,
            completed_at: Utc::now(),
            elevators,
        }
    }

    /// Get the percentage of requested passengers that were delivered
    pub fn delivery_percentage(&self) -> f64 {
        if self.passengers_requested == 0 {
            0.0
        } else {
            (self.passengers_delivered as f64 / self.passengers_requested as f64) * 100.0
        }
    }

    /// Get the average number of floors travelled per delivered passenger
    pub fn average_floors_per_delivery(&self) -> f64 {
        if self.passengers_delivered == 0 {
            0.0
        } else {
            self.total_floors_travelled as f64 / self.passengers_delivered as f64
        }
    }

    /// Get the average number of loading stops per elevator
    pub fn average_stops_per_elevator(&self) -> f64 {
        if self.elevator_count == 0 {
            0.0
        } else {
            self.total_stops as f64 / self.elevator_count as f64
        }
    }

    /// Get the number of deliveries per wall-clock second
    pub fn deliveries_per_second(&self) -> f64 {
        let seconds = self.simulation_duration.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            self.passengers_delivered as f64 / seconds
        }
    }

    /// Generate a comprehensive summary report
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Simulation Summary Report ===\n\n");

        report.push_str(&format!(
            "Simulation Duration: {:.2} seconds\n",
            self.simulation_duration.as_secs_f64()
        ));
        report.push_str(&format!(
            "Building: {} floors, {} elevators\n\n",
            self.floors, self.elevator_count
        ));

        report.push_str("Passenger Statistics:\n");
        report.push_str(&format!("  Requested: {}\n", self.passengers_requested));
        report.push_str(&format!(
            "  Delivered: {} ({:.1}%)\n",
            self.passengers_delivered,
            self.delivery_percentage()
        ));
        report.push_str(&format!("  Pending: {}\n\n", self.passengers_pending));

        report.push_str("Fleet Statistics:\n");
        report.push_str(&format!(
            "  Floors Travelled: {} (avg {:.1} per delivery)\n",
            self.total_floors_travelled,
            self.average_floors_per_delivery()
        ));
        report.push_str(&format!(
            "  Loading Stops: {} (avg {:.1} per elevator)\n",
            self.total_stops,
            self.average_stops_per_elevator()
        ));
        report.push_str(&format!(
            "  Throughput: {:.2} deliveries/second\n\n",
            self.deliveries_per_second()
        ));

        report.push_str("Per-Elevator Breakdown:\n");
        for unit in &self.elevators {
            report.push_str(&format!(
                "  {}: ended on floor {}, {} floors travelled, {} stops, {} boarded, {} delivered\n",
                unit.id,
                unit.final_floor,
                unit.counters.floors_travelled,
                unit.counters.stops,
                unit.counters.passengers_boarded,
                unit.counters.passengers_delivered
            ));
        }

        report
    }

    /// Generate a compact one-line summary suitable for logging
    pub fn generate_compact_summary(&self) -> String {
        format!(
            "Simulation: {} requested, {} delivered ({:.1}%), {} pending, {} floors travelled, {} stops in {:.2}s",
            self.passengers_requested,
            self.passengers_delivered,
            self.delivery_percentage(),
            self.passengers_pending,
            self.total_floors_travelled,
            self.total_stops,
            self.simulation_duration.as_secs_f64()
        )
    }

    /// Save the statistics as pretty-printed JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> SimulationResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Building;
    use crate::elevator::Elevator;
    use std::io::Read;

    fn building_with_counters() -> Building {
        let building = Building::new(10).unwrap();
        for (travelled, stops, boarded, delivered) in [(12, 4, 5, 3), (8, 2, 3, 2)] {
            let unit = Elevator::sample();
            building.add_elevator(unit.clone()).unwrap();
            unit.with_state(|state| {
                state.counters.floors_travelled = travelled;
                state.counters.stops = stops;
                state.counters.passengers_boarded = boarded;
                state.counters.passengers_delivered = delivered;
            });
        }
        building
    }

    #[test]
    fn test_statistics_aggregate_fleet_counters() {
        let building = building_with_counters();
        let snapshot = building.snapshot();

        let stats = SimulationStatistics::from_snapshot(&snapshot, 6, Duration::from_secs(10));

        assert_eq!(stats.floors, 10);
        assert_eq!(stats.elevator_count, 2);
        assert_eq!(stats.passengers_requested, 6);
        assert_eq!(stats.passengers_delivered, 5);
        assert_eq!(stats.passengers_pending, 0);
        assert_eq!(stats.total_floors_travelled, 20);
        assert_eq!(stats.total_stops, 6);
        assert_eq!(stats.elevators.len(), 2);
    }

    #[test]
    fn test_statistics_rate_calculations() {
        let building = building_with_counters();
        let stats = SimulationStatistics::from_snapshot(
            &building.snapshot(),
            10,
            Duration::from_secs(10),
        );

        assert_eq!(stats.delivery_percentage(), 50.0); // 5 of 10
        assert_eq!(stats.average_floors_per_delivery(), 4.0); // 20 / 5
        assert_eq!(stats.average_stops_per_elevator(), 3.0); // 6 / 2
        assert_eq!(stats.deliveries_per_second(), 0.5); // 5 / 10s
    }

    #[test]
    fn test_statistics_zero_division() {
        let building = Building::new(5).unwrap();
        let stats = SimulationStatistics::from_snapshot(
            &building.snapshot(),
            0,
            Duration::from_secs(0),
        );

        assert_eq!(stats.delivery_percentage(), 0.0);
        assert_eq!(stats.average_floors_per_delivery(), 0.0);
        assert_eq!(stats.average_stops_per_elevator(), 0.0);
        assert_eq!(stats.deliveries_per_second(), 0.0);
    }

    #[test]
    fn test_statistics_summary_generation() {
        let building = building_with_counters();
        let stats = SimulationStatistics::from_snapshot(
            &building.snapshot(),
            6,
            Duration::from_secs(10),
        );

        let summary = stats.generate_summary_report();
        assert!(summary.contains("=== Simulation Summary Report ==="));
        assert!(summary.contains("Building: 10 floors, 2 elevators"));
        assert!(summary.contains("Delivered: 5 (83.3%)"));
        assert!(summary.contains("Floors Travelled: 20"));

        let compact = stats.generate_compact_summary();
        assert!(compact.contains("6 requested"));
        assert!(compact.contains("5 delivered"));

        let display_output = format!("{}", stats);
        assert!(display_output.contains("=== Simulation Summary Report ==="));
    }

    #[test]
    fn test_statistics_save_to_file() {
        let building = building_with_counters();
        let stats = SimulationStatistics::from_snapshot(
            &building.snapshot(),
            6,
            Duration::from_secs(10),
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        stats.save_to_file(file.path()).unwrap();

        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["passengers_delivered"], 5);
        assert_eq!(parsed["elevators"].as_array().unwrap().len(), 2);
    }
}
