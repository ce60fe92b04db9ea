//! The building, its fleet, and the dispatcher
//!
//! This module contains the [`Building`] with its provisioning and ingress
//! surface, and the recurring dispatch pass that assigns waiting passengers
//! to the unit with the lowest arrival-time estimate.

pub(crate) mod dispatch;
pub mod fleet;

// Re-export all public types for convenience
pub use fleet::*;
