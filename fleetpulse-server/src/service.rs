//! The fleet service: one owned roster, its simulator, and a trained model.
//!
//! `FleetService` has no interior locking. The HTTP adapter wraps it in a
//! single mutex; the CLI drives it directly.

use chrono::Utc;

use fleetpulse_core::domain::Truck;
use fleetpulse_core::fleet::{FleetKpis, FleetSimulator, FleetState};
use fleetpulse_core::model::{
    ModelError, OpportunityModel, OpportunityQuery, Prediction, TrainingSummary,
};
use fleetpulse_core::rng::SeededRandom;

use crate::config::FleetPulseConfig;
use crate::report::FleetReport;

pub struct FleetService {
    fleet: FleetState,
    simulator: FleetSimulator<SeededRandom>,
    model: OpportunityModel,
    scenario: OpportunityQuery,
}

impl FleetService {
    /// Generate the market history, train the model, and seed the roster.
    ///
    /// Training runs to completion here, before any poll can be served.
    pub fn from_config(config: &FleetPulseConfig) -> Result<Self, ModelError> {
        let history = config.market.generate();
        tracing::info!(
            records = history.len(),
            seed = config.market.seed,
            "generated market history"
        );
        let model = OpportunityModel::trained(config.model.clone(), &history)?;
        Ok(Self::with_model(config, model))
    }

    /// Build around an already trained (or deliberately untrained) model.
    pub fn with_model(config: &FleetPulseConfig, model: OpportunityModel) -> Self {
        Self {
            fleet: FleetState::seeded(),
            simulator: FleetSimulator::new(
                config.simulation.tuning.clone(),
                SeededRandom::new(config.simulation.seed),
            ),
            model,
            scenario: config.scenario.clone(),
        }
    }

    /// One dashboard poll: advance the fleet one tick, score the fixed
    /// scenario, and assemble the report.
    pub fn poll(&mut self) -> Result<FleetReport, ModelError> {
        let snapshot = self.simulator.tick(&mut self.fleet);
        let prediction = self.model.predict_query(&self.scenario)?;
        tracing::debug!(
            tick = self.fleet.tick_count(),
            probability_pct = prediction.probability_pct,
            "fleet poll served"
        );
        Ok(FleetReport::assemble(snapshot, &prediction, Utc::now()))
    }

    /// Advance the fleet one tick without scoring.
    pub fn tick(&mut self) -> Vec<Truck> {
        self.simulator.tick(&mut self.fleet)
    }

    pub fn predict(&self, query: &OpportunityQuery) -> Result<Prediction, ModelError> {
        self.model.predict_query(query)
    }

    pub fn fleet(&self) -> &FleetState {
        &self.fleet
    }

    pub fn kpis(&self) -> FleetKpis {
        self.fleet.kpis()
    }

    pub fn tick_count(&self) -> u64 {
        self.fleet.tick_count()
    }

    pub fn scenario(&self) -> &OpportunityQuery {
        &self.scenario
    }

    pub fn training_summary(&self) -> Option<&TrainingSummary> {
        self.model.summary()
    }
}
