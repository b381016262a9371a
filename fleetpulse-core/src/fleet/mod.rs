//! Fleet simulation: roster ownership, per-tick state machine, KPIs.

pub mod kpi;
pub mod roster;
pub mod simulator;
pub mod state_machine;

pub use kpi::FleetKpis;
pub use roster::default_roster;
pub use simulator::{wrap, FleetSimulator, FleetState, SimulationConfig};
pub use state_machine::{
    next_status, Anomaly, Transition, TransitionEvent, FUEL_THEFT_ABOVE, TRANSITIONS,
    VIBRATION_RISK_BELOW,
};
