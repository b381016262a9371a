//! Synthetic freight-market history.
//!
//! Produces plausible, rule-based training data for the opportunity model:
//! demand rises during festivals and in the Oct–Dec peak season, and winning
//! prices sit within ±10% of the competitor rate.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::{MarketObservation, TruckType};

/// Baseline probability that a backhaul load is found.
pub const BASE_DEMAND: f64 = 0.40;
/// Added when the record falls in a festival period.
pub const FESTIVAL_UPLIFT: f64 = 0.30;
/// Added for peak-season months.
pub const PEAK_SEASON_UPLIFT: f64 = 0.20;
/// Months that count as peak season.
pub const PEAK_SEASON_MONTHS: [u8; 3] = [10, 11, 12];
/// Upper bound on the demand probability.
pub const MAX_DEMAND: f64 = 0.95;
/// Share of records drawn as festival periods.
pub const FESTIVAL_SHARE: f64 = 0.2;

const COMPETITOR_RATE: (f64, f64) = (15_000.0, 22_000.0);
const FUEL_PRICE: (f64, f64) = (90.0, 105.0);
const PRICE_SPREAD: (f64, f64) = (0.9, 1.1);

/// Generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketGeneratorConfig {
    pub records: usize,
    pub seed: u64,
}

impl Default for MarketGeneratorConfig {
    fn default() -> Self {
        Self {
            records: 1000,
            seed: 42,
        }
    }
}

impl MarketGeneratorConfig {
    pub fn generate(&self) -> Vec<MarketObservation> {
        generate(self.records, self.seed)
    }
}

/// Probability that a load is found for the given month and festival flag.
pub fn demand_probability(month: u8, is_festival: bool) -> f64 {
    let mut prob = BASE_DEMAND;
    if is_festival {
        prob += FESTIVAL_UPLIFT;
    }
    if PEAK_SEASON_MONTHS.contains(&month) {
        prob += PEAK_SEASON_UPLIFT;
    }
    prob.min(MAX_DEMAND)
}

/// Generate `n` observations. The same seed always yields the same sequence.
pub fn generate(n: usize, seed: u64) -> Vec<MarketObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| draw_observation(&mut rng)).collect()
}

fn draw_observation(rng: &mut StdRng) -> MarketObservation {
    let month: u8 = rng.gen_range(1..=12);
    let truck_type = *TruckType::ALL
        .choose(rng)
        .unwrap_or(&TruckType::OpenBody);
    let is_festival = rng.gen_bool(FESTIVAL_SHARE);
    let competitor_rate = rng.gen_range(COMPETITOR_RATE.0..COMPETITOR_RATE.1);
    let fuel_price = rng.gen_range(FUEL_PRICE.0..FUEL_PRICE.1);

    let load_found = rng.gen_bool(demand_probability(month, is_festival));
    let spread = rng.gen_range(PRICE_SPREAD.0..PRICE_SPREAD.1);
    let winning_price = if load_found {
        competitor_rate * spread
    } else {
        0.0
    };

    MarketObservation {
        month,
        truck_type,
        is_festival,
        competitor_rate,
        fuel_price,
        load_found,
        winning_price,
    }
}
