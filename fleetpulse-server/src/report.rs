//! Dashboard payload assembly.
//!
//! Merges a fleet snapshot, its KPIs and one opportunity prediction into the
//! JSON shape the dashboard polls. All display formatting (rupee amounts,
//! percentages) happens here; the core types stay numeric.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fleetpulse_core::domain::Truck;
use fleetpulse_core::fleet::FleetKpis;
use fleetpulse_core::model::Prediction;

/// Top-of-dashboard KPI ribbon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRibbon {
    pub utilization: u32,
    pub empty_rate: u32,
    /// Total revenue in thousands, e.g. `₹140.0K`.
    pub revenue: String,
    pub alerts: usize,
}

impl From<&FleetKpis> for KpiRibbon {
    fn from(kpis: &FleetKpis) -> Self {
        Self {
            utilization: kpis.utilization,
            empty_rate: kpis.empty_rate,
            revenue: format_revenue(kpis.total_revenue),
            alerts: kpis.alert_count,
        }
    }
}

/// Backhaul opportunity panel. Keys are the dashboard's display labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreightPanel {
    #[serde(rename = "Backhaul Probability")]
    pub probability: String,
    #[serde(rename = "AI Recommended Offer")]
    pub offer: String,
    #[serde(rename = "Strategy")]
    pub strategy: String,
}

impl From<&Prediction> for FreightPanel {
    fn from(p: &Prediction) -> Self {
        Self {
            probability: format_percent(p.probability_pct),
            offer: format_rupees(p.recommended_price),
            strategy: p.strategy.label().to_string(),
        }
    }
}

/// One `/api/fleet-data` response.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    pub kpis: KpiRibbon,
    pub fleet: Vec<Truck>,
    pub ai_freight: FreightPanel,
    pub generated_at: DateTime<Utc>,
}

impl FleetReport {
    pub fn assemble(
        fleet: Vec<Truck>,
        prediction: &Prediction,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let kpis = FleetKpis::from_trucks(&fleet);
        Self {
            kpis: KpiRibbon::from(&kpis),
            fleet,
            ai_freight: FreightPanel::from(prediction),
            generated_at,
        }
    }
}

/// `₹` + thousands, one decimal: `140000.0` → `₹140.0K`.
pub fn format_revenue(total: f64) -> String {
    format!("₹{:.1}K", total / 1000.0)
}

/// One decimal with a percent sign: `87.26` → `87.3%`.
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Whole rupees with comma grouping: `18523.4` → `₹18,523`.
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{amount}");
    }
    let digits = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && digits != "0" { "-" } else { "" };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}₹{grouped}")
}
