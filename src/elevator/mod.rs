//! Elevator units and their autonomous scheduling
//!
//! This module contains everything that makes a single car run: the drive
//! state machine, the boarding-eligibility filter, the per-unit worker loop,
//! and the public [`Elevator`] handle with admission, arrival-time
//! estimation, and lifecycle control.

pub(crate) mod boarding;
pub mod state;
pub mod unit;
pub(crate) mod worker;

// Re-export all public types for convenience
pub use state::*;
pub use unit::*;
