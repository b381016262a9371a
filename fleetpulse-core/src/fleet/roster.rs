//! The fixed five-truck roster the service boots with.

use crate::domain::{Truck, TruckId, TruckStatus};

#[allow(clippy::too_many_arguments)]
fn truck(
    id: &str,
    status: TruckStatus,
    lat: f64,
    lng: f64,
    fuel: f64,
    speed: u32,
    temp: u32,
    oil: u32,
    vib: f64,
    revenue: f64,
    alert_msg: Option<&str>,
) -> Truck {
    Truck {
        id: TruckId::new(id),
        status,
        lat,
        lng,
        fuel,
        speed,
        temp,
        oil,
        vib,
        revenue,
        alert_msg: alert_msg.map(str::to_string),
    }
}

/// One truck per status plus a second loaded truck.
pub fn default_roster() -> Vec<Truck> {
    vec![
        truck(
            "JH-01-AB-1001",
            TruckStatus::Active,
            30.0,
            30.0,
            78.0,
            65,
            88,
            45,
            0.2,
            45000.0,
            None,
        ),
        truck("JH-01-XX-5555", TruckStatus::Empty, 60.0, 80.0, 45.0, 55, 85, 42, 0.3, 0.0, None),
        truck(
            "JH-01-XY-9876",
            TruckStatus::Warning,
            45.0,
            55.0,
            60.0,
            40,
            92,
            38,
            0.85,
            32000.0,
            Some("Pred: Axle Failure (500km)"),
        ),
        truck(
            "JH-05-ZZ-2233",
            TruckStatus::Active,
            20.0,
            60.0,
            90.0,
            70,
            82,
            48,
            0.1,
            51000.0,
            None,
        ),
        truck(
            "JH-09-QQ-1122",
            TruckStatus::Alert,
            70.0,
            20.0,
            15.0,
            0,
            90,
            40,
            0.1,
            12000.0,
            Some("THEFT: -20L Detected"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_unique_ids() {
        let roster = default_roster();
        let mut ids: Vec<_> = roster.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn only_flagged_trucks_carry_messages() {
        for truck in default_roster() {
            assert_eq!(truck.alert_msg.is_some(), truck.status.is_flagged(), "{}", truck.id);
        }
    }
}
