//! Aggregate fleet KPIs for the dashboard ribbon.

use serde::{Deserialize, Serialize};

use crate::domain::{Truck, TruckStatus};

/// KPIs derived from the current roster. Never stored; recompute after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetKpis {
    pub total: usize,
    pub active: usize,
    pub empty: usize,
    pub warning: usize,
    pub alert: usize,
    /// `round(100 * active / total)`, 0 for an empty fleet.
    pub utilization: u32,
    /// `round(100 * empty / total)`, 0 for an empty fleet.
    pub empty_rate: u32,
    /// Trucks in `warning` or `alert`.
    pub alert_count: usize,
    pub total_revenue: f64,
}

impl FleetKpis {
    pub fn from_trucks(trucks: &[Truck]) -> Self {
        let mut kpis = Self {
            total: trucks.len(),
            ..Self::default()
        };

        for truck in trucks {
            match truck.status {
                TruckStatus::Active => kpis.active += 1,
                TruckStatus::Empty => kpis.empty += 1,
                TruckStatus::Warning => kpis.warning += 1,
                TruckStatus::Alert => kpis.alert += 1,
            }
            kpis.total_revenue += truck.revenue;
        }

        kpis.utilization = percent_of(kpis.active, kpis.total);
        kpis.empty_rate = percent_of(kpis.empty, kpis.total);
        kpis.alert_count = kpis.warning + kpis.alert;
        kpis
    }
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u32
}
