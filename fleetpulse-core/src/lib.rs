//! FleetPulse Core: fleet simulation and freight opportunity modelling.
//!
//! - Domain types (trucks, statuses, market observations)
//! - Per-tick fleet simulator with an explicit status state machine
//! - Synthetic market history generator and CSV export
//! - Random-forest opportunity model (load probability + price)
//! - Injectable randomness for deterministic tests

pub mod domain;
pub mod fleet;
pub mod market;
pub mod model;
pub mod rng;
