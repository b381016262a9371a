//! Backhaul opportunity model: demand classifier + price regressor.
//!
//! Both stages share the feature vector
//! `[month, is_festival, truck_type_code, competitor_rate, fuel_price]`.
//! The classifier is fit on every observation; the regressor only on those
//! where a load was found. The recommended price is therefore the regressor's
//! estimate *given* a load, reported regardless of the predicted probability.

use serde::{Deserialize, Serialize};

use super::encoder::CategoryEncoder;
use super::error::ModelError;
use super::forest::{ForestConfig, RandomForest};
use super::tree::Criterion;
use crate::domain::MarketObservation;

/// Names of the model features, in vector order.
pub const FEATURE_NAMES: [&str; 5] = [
    "month",
    "is_festival",
    "truck_type_code",
    "competitor_rate",
    "fuel_price",
];

/// Probability (percent) above which demand is high.
pub const HIGH_DEMAND_ABOVE: f64 = 80.0;
/// Probability (percent) above which demand is moderate.
pub const MODERATE_DEMAND_ABOVE: f64 = 50.0;

/// Quoting advice derived from the load probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "High Demand! Quote High.")]
    QuoteHigh,
    #[serde(rename = "Moderate Demand.")]
    Moderate,
    #[serde(rename = "Low Demand! Offer Discount.")]
    OfferDiscount,
}

impl Strategy {
    pub fn from_probability(probability_pct: f64) -> Self {
        if probability_pct > HIGH_DEMAND_ABOVE {
            Self::QuoteHigh
        } else if probability_pct > MODERATE_DEMAND_ABOVE {
            Self::Moderate
        } else {
            Self::OfferDiscount
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::QuoteHigh => "High Demand! Quote High.",
            Self::Moderate => "Moderate Demand.",
            Self::OfferDiscount => "Low Demand! Offer Discount.",
        }
    }
}

/// A market scenario to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityQuery {
    pub month: u8,
    pub truck_type: String,
    pub is_festival: bool,
    pub market_rate: f64,
    pub fuel_price: f64,
}

impl Default for OpportunityQuery {
    /// A truck in Kolkata during the October festival season looking for a
    /// return load.
    fn default() -> Self {
        Self {
            month: 10,
            truck_type: "Open Body".into(),
            is_festival: true,
            market_rate: 18_500.0,
            fuel_price: 98.0,
        }
    }
}

/// The opportunity score for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability of finding a load, in `[0, 100]`.
    pub probability_pct: f64,
    pub recommended_price: f64,
    pub strategy: Strategy,
}

/// Hyperparameters for both stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub classifier: ForestConfig,
    pub regressor: ForestConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            classifier: ForestConfig::classifier(),
            regressor: ForestConfig::regressor(),
        }
    }
}

/// What a completed `train` call saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub records: usize,
    pub positive_records: usize,
    pub categories: Vec<String>,
    pub classifier_trees: usize,
    pub regressor_trees: usize,
}

#[derive(Debug, Clone)]
struct FittedModel {
    encoder: CategoryEncoder,
    classifier: RandomForest,
    regressor: RandomForest,
    summary: TrainingSummary,
}

/// Two-stage opportunity model. Train once, then query.
#[derive(Debug, Clone, Default)]
pub struct OpportunityModel {
    config: ModelConfig,
    fitted: Option<FittedModel>,
}

impl OpportunityModel {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Construct and train in one step.
    pub fn trained(
        config: ModelConfig,
        observations: &[MarketObservation],
    ) -> Result<Self, ModelError> {
        let mut model = Self::new(config);
        model.train(observations)?;
        Ok(model)
    }

    pub fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn summary(&self) -> Option<&TrainingSummary> {
        self.fitted.as_ref().map(|f| &f.summary)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fit both stages. May be called once; fitted parameters never change
    /// afterwards.
    pub fn train(
        &mut self,
        observations: &[MarketObservation],
    ) -> Result<&TrainingSummary, ModelError> {
        if self.fitted.is_some() {
            return Err(ModelError::AlreadyTrained);
        }
        if observations.is_empty() {
            return Err(ModelError::InsufficientData("training set is empty".into()));
        }

        let encoder = CategoryEncoder::fit(observations.iter().map(|o| o.truck_type.as_str()));

        let mut x = Vec::with_capacity(observations.len());
        let mut labels = Vec::with_capacity(observations.len());
        let mut x_found = Vec::new();
        let mut prices = Vec::new();

        for obs in observations {
            let code = encoder.transform(obs.truck_type.as_str())?;
            let row = features(
                obs.month,
                obs.is_festival,
                code,
                obs.competitor_rate,
                obs.fuel_price,
            );
            if obs.load_found {
                x_found.push(row.clone());
                prices.push(obs.winning_price);
            }
            labels.push(if obs.load_found { 1.0 } else { 0.0 });
            x.push(row);
        }

        if x_found.is_empty() {
            return Err(ModelError::InsufficientData(
                "no observations with a load found; price regressor cannot be fit".into(),
            ));
        }

        let classifier = RandomForest::fit(
            &x,
            &labels,
            Criterion::Gini,
            &self.config.classifier,
            "classifier",
        );
        let regressor = RandomForest::fit(
            &x_found,
            &prices,
            Criterion::SquaredError,
            &self.config.regressor,
            "regressor",
        );

        let summary = TrainingSummary {
            records: observations.len(),
            positive_records: x_found.len(),
            categories: encoder.classes().into_iter().map(String::from).collect(),
            classifier_trees: classifier.n_estimators(),
            regressor_trees: regressor.n_estimators(),
        };

        tracing::info!(
            records = summary.records,
            positive_records = summary.positive_records,
            classifier_trees = summary.classifier_trees,
            regressor_trees = summary.regressor_trees,
            "opportunity model trained"
        );

        let fitted = self.fitted.insert(FittedModel {
            encoder,
            classifier,
            regressor,
            summary,
        });
        Ok(&fitted.summary)
    }

    /// Score a single scenario.
    pub fn predict(
        &self,
        month: u8,
        truck_type: &str,
        is_festival: bool,
        market_rate: f64,
        fuel_price: f64,
    ) -> Result<Prediction, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotTrained)?;
        let code = fitted.encoder.transform(truck_type)?;
        let row = features(month, is_festival, code, market_rate, fuel_price);

        let probability_pct = (fitted.classifier.predict(&row) * 100.0).clamp(0.0, 100.0);
        let recommended_price = fitted.regressor.predict(&row);

        Ok(Prediction {
            probability_pct,
            recommended_price,
            strategy: Strategy::from_probability(probability_pct),
        })
    }

    pub fn predict_query(&self, query: &OpportunityQuery) -> Result<Prediction, ModelError> {
        self.predict(
            query.month,
            &query.truck_type,
            query.is_festival,
            query.market_rate,
            query.fuel_price,
        )
    }
}

fn features(
    month: u8,
    is_festival: bool,
    truck_code: usize,
    rate: f64,
    fuel_price: f64,
) -> Vec<f64> {
    vec![
        f64::from(month),
        if is_festival { 1.0 } else { 0.0 },
        truck_code as f64,
        rate,
        fuel_price,
    ]
}
