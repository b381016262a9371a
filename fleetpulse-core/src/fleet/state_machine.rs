//! Truck status state machine.
//!
//! Status changes happen only through anomaly injection during a tick:
//!
//! ```text
//!   Active --VibrationRisk--> Warning
//!   Active --FuelTheft------> Alert
//! ```
//!
//! `Empty` has no outgoing transitions. `Warning` and `Alert` have none either:
//! a warning waits for a maintenance dispatch and an alert is terminal until
//! the embedding system intervenes. No recovery path is defined here.

use serde::{Deserialize, Serialize};

use crate::domain::{TruckId, TruckStatus};

/// Draws strictly below this value inject a vibration-risk warning (1%).
pub const VIBRATION_RISK_BELOW: f64 = 0.01;

/// Draws strictly above this value inject a fuel-theft alert (0.5%).
pub const FUEL_THEFT_ABOVE: f64 = 0.995;

/// An injected fault or security event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anomaly {
    /// Predictive-maintenance flag: abnormal vibration signature.
    VibrationRisk,
    /// Security flag: sudden fuel drop while the truck is moving.
    FuelTheft,
}

impl Anomaly {
    /// Classify a uniform draw in `[0, 1)`.
    ///
    /// The two bands are disjoint; the remaining 98.5% of draws yield `None`.
    pub fn from_draw(draw: f64) -> Option<Self> {
        if draw < VIBRATION_RISK_BELOW {
            Some(Self::VibrationRisk)
        } else if draw > FUEL_THEFT_ABOVE {
            Some(Self::FuelTheft)
        } else {
            None
        }
    }

    pub fn alert_message(&self) -> &'static str {
        match self {
            Self::VibrationRisk => "Pred: High Vibration Risk",
            Self::FuelTheft => "THEFT: Sudden Fuel Drop",
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TruckStatus,
    pub on: Anomaly,
    pub to: TruckStatus,
}

/// The complete transition table. Pairs not listed leave the status unchanged.
pub const TRANSITIONS: [Transition; 2] = [
    Transition {
        from: TruckStatus::Active,
        on: Anomaly::VibrationRisk,
        to: TruckStatus::Warning,
    },
    Transition {
        from: TruckStatus::Active,
        on: Anomaly::FuelTheft,
        to: TruckStatus::Alert,
    },
];

/// Look up the status reached from `current` on `anomaly`, if any.
pub fn next_status(current: TruckStatus, anomaly: Anomaly) -> Option<TruckStatus> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == current && t.on == anomaly)
        .map(|t| t.to)
}

impl TruckStatus {
    /// Whether anomaly injection is evaluated for this status at all.
    pub fn accepts_anomalies(&self) -> bool {
        TRANSITIONS.iter().any(|t| t.from == *self)
    }

    /// `Alert` has no exit: the truck stays stopped until resolved externally.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Alert)
    }

    /// `Warning` keeps moving but has no automatic recovery.
    pub fn is_pending_dispatch(&self) -> bool {
        matches!(self, Self::Warning)
    }
}

/// Audit record of a status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub tick: u64,
    pub truck_id: TruckId,
    pub from: TruckStatus,
    pub to: TruckStatus,
    pub anomaly: Anomaly,
}
