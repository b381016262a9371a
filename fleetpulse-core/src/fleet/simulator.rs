//! Per-tick fleet simulation.
//!
//! [`FleetState`] owns the roster; [`FleetSimulator`] owns the tuning and the
//! injected [`RandomSource`]. One call to [`FleetSimulator::tick`] advances
//! every truck by one step, in roster order:
//!
//! 1. `active` trucks drop any stale alert message.
//! 2. Trucks not in `alert` move (wrapped, never clamped), burn fuel, resample
//!    speed/temperature/oil/vibration, then draw once for anomaly injection.
//!    Only `active` trucks act on that draw.
//! 3. `alert` trucks are frozen and consume no draws.

use serde::{Deserialize, Serialize};

use super::kpi::FleetKpis;
use super::roster::default_roster;
use super::state_machine::{next_status, Anomaly, TransitionEvent};
use crate::domain::{Truck, TruckId, TruckStatus};
use crate::rng::RandomSource;

/// Simulation tuning. Defaults reproduce the dashboard feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Latitude wraps into `[0, lat_bound)`.
    pub lat_bound: f64,
    /// Longitude wraps into `[0, lng_bound)`.
    pub lng_bound: f64,
    /// Per-tick latitude displacement range `[min, max)`.
    pub lat_step: [f64; 2],
    /// Per-tick longitude displacement range `[min, max)`; biased eastward.
    pub lng_step: [f64; 2],
    /// Fuel percent burned per moving tick.
    pub fuel_burn: f64,
    /// Inclusive speed range (km/h) for moving trucks.
    pub speed: [u32; 2],
    /// Inclusive engine temperature range.
    pub temp: [u32; 2],
    /// Inclusive oil pressure range.
    pub oil: [u32; 2],
    /// Vibration index range `[min, max)`.
    pub vib: [f64; 2],
    /// Vibration forced on a vibration-risk warning.
    pub vibration_spike: f64,
    /// Fuel percent removed on a theft alert.
    pub theft_fuel_drop: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lat_bound: 95.0,
            lng_bound: 98.0,
            lat_step: [-0.3, 0.3],
            lng_step: [-0.3, 0.8],
            fuel_burn: 0.03,
            speed: [40, 80],
            temp: [80, 98],
            oil: [40, 55],
            vib: [0.1, 0.45],
            vibration_spike: 0.92,
            theft_fuel_drop: 10.0,
        }
    }
}

/// The live roster plus its tick counter and transition log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetState {
    trucks: Vec<Truck>,
    tick: u64,
    transitions: Vec<TransitionEvent>,
}

impl FleetState {
    pub fn new(trucks: Vec<Truck>) -> Self {
        Self {
            trucks,
            tick: 0,
            transitions: Vec::new(),
        }
    }

    /// The five-truck boot roster.
    pub fn seeded() -> Self {
        Self::new(default_roster())
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn truck(&self, id: &TruckId) -> Option<&Truck> {
        self.trucks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Number of ticks applied so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Every status change since the state was created, oldest first.
    pub fn transitions(&self) -> &[TransitionEvent] {
        &self.transitions
    }

    pub fn kpis(&self) -> FleetKpis {
        FleetKpis::from_trucks(&self.trucks)
    }

    /// Owned copy of the roster, safe to hand out across a lock boundary.
    pub fn snapshot(&self) -> Vec<Truck> {
        self.trucks.clone()
    }
}

/// Advances a [`FleetState`] one tick at a time.
#[derive(Debug, Clone)]
pub struct FleetSimulator<R: RandomSource> {
    config: SimulationConfig,
    rng: R,
}

impl<R: RandomSource> FleetSimulator<R> {
    pub fn new(config: SimulationConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Advance every truck by one step and return a snapshot of the result.
    pub fn tick(&mut self, fleet: &mut FleetState) -> Vec<Truck> {
        fleet.tick += 1;
        let tick = fleet.tick;

        for truck in fleet.trucks.iter_mut() {
            if let Some(event) = self.step_truck(truck, tick) {
                tracing::info!(
                    tick,
                    truck = %event.truck_id,
                    from = %event.from,
                    to = %event.to,
                    anomaly = ?event.anomaly,
                    "status transition"
                );
                fleet.transitions.push(event);
            }
        }

        tracing::debug!(tick, trucks = fleet.trucks.len(), "fleet tick applied");
        fleet.snapshot()
    }

    fn step_truck(&mut self, truck: &mut Truck, tick: u64) -> Option<TransitionEvent> {
        if truck.status == TruckStatus::Active {
            truck.alert_msg = None;
        }

        if !truck.is_moving() {
            return None;
        }

        let cfg = &self.config;
        let rng = &mut self.rng;

        truck.lng = wrap(truck.lng + rng.uniform(cfg.lng_step[0], cfg.lng_step[1]), cfg.lng_bound);
        truck.lat = wrap(truck.lat + rng.uniform(cfg.lat_step[0], cfg.lat_step[1]), cfg.lat_bound);
        truck.fuel = (truck.fuel - cfg.fuel_burn).max(0.0);

        truck.speed = draw_u32(rng, cfg.speed);
        truck.temp = draw_u32(rng, cfg.temp);
        truck.oil = draw_u32(rng, cfg.oil);
        truck.vib = rng.uniform(cfg.vib[0], cfg.vib[1]);

        let draw = rng.next_unit();
        if !truck.status.accepts_anomalies() {
            return None;
        }
        let anomaly = Anomaly::from_draw(draw)?;
        let to = next_status(truck.status, anomaly)?;

        match anomaly {
            Anomaly::VibrationRisk => truck.vib = cfg.vibration_spike,
            Anomaly::FuelTheft => {
                truck.fuel = (truck.fuel - cfg.theft_fuel_drop).max(0.0);
                truck.speed = 0;
            }
        }
        truck.alert_msg = Some(anomaly.alert_message().to_string());

        let from = truck.status;
        truck.status = to;

        Some(TransitionEvent {
            tick,
            truck_id: truck.id.clone(),
            from,
            to,
            anomaly,
        })
    }
}

fn draw_u32<R: RandomSource>(rng: &mut R, range: [u32; 2]) -> u32 {
    rng.int_inclusive(i64::from(range[0]), i64::from(range[1])) as u32
}

/// Wrap `value` into `[0, bound)`.
///
/// `rem_euclid` can round up to exactly `bound` for tiny negative inputs;
/// that case folds back to 0.
pub fn wrap(value: f64, bound: f64) -> f64 {
    let wrapped = value.rem_euclid(bound);
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}
