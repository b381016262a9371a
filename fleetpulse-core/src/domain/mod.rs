//! Domain types for FleetPulse

pub mod ids;
pub mod observation;
pub mod truck;

pub use ids::TruckId;
pub use observation::{MarketObservation, TruckType, TruckTypeParseError};
pub use truck::{Truck, TruckStatus};
