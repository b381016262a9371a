//! Truck record and operating status.

use super::ids::TruckId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating status of a truck.
///
/// `Active` trucks are loaded, `Empty` trucks are returning without freight.
/// `Warning` (maintenance prediction) and `Alert` (security incident) are
/// entered only through anomaly injection; see [`crate::fleet::state_machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    Active,
    Empty,
    Warning,
    Alert,
}

impl TruckStatus {
    pub const ALL: [TruckStatus; 4] = [
        TruckStatus::Active,
        TruckStatus::Empty,
        TruckStatus::Warning,
        TruckStatus::Alert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Empty => "empty",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }

    /// Alerted trucks are stopped: no movement, no telemetry, no anomaly draws.
    pub fn is_moving(&self) -> bool {
        !matches!(self, Self::Alert)
    }

    /// Counted in the dashboard's alert KPI.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Warning | Self::Alert)
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single truck: position, fuel, and telematics channels.
///
/// Field names and units mirror the dashboard payload: `lat`/`lng` are map
/// coordinates on a wrapped rectangle, `fuel` is percent, `speed` is km/h,
/// `temp` is engine temperature in °C, `oil` is oil pressure in psi and `vib`
/// is a normalized vibration index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: TruckId,
    pub status: TruckStatus,
    pub lat: f64,
    pub lng: f64,
    pub fuel: f64,
    pub speed: u32,
    pub temp: u32,
    pub oil: u32,
    pub vib: f64,
    pub revenue: f64,
    pub alert_msg: Option<String>,
}

impl Truck {
    pub fn is_moving(&self) -> bool {
        self.status.is_moving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Truck {
        Truck {
            id: TruckId::new("JH-01-AB-1001"),
            status: TruckStatus::Active,
            lat: 30.0,
            lng: 30.0,
            fuel: 78.0,
            speed: 65,
            temp: 88,
            oil: 45,
            vib: 0.2,
            revenue: 45000.0,
            alert_msg: None,
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        for status in TruckStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn only_alert_is_stopped() {
        assert!(TruckStatus::Active.is_moving());
        assert!(TruckStatus::Empty.is_moving());
        assert!(TruckStatus::Warning.is_moving());
        assert!(!TruckStatus::Alert.is_moving());
    }

    #[test]
    fn flagged_statuses() {
        assert!(!TruckStatus::Active.is_flagged());
        assert!(!TruckStatus::Empty.is_flagged());
        assert!(TruckStatus::Warning.is_flagged());
        assert!(TruckStatus::Alert.is_flagged());
    }

    #[test]
    fn truck_json_has_dashboard_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        for key in [
            "id", "status", "lat", "lng", "fuel", "speed", "temp", "oil", "vib", "revenue",
            "alert_msg",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["status"], "active");
        assert!(value["alert_msg"].is_null());
    }
}
