//! Backhaul opportunity prediction: label encoding, CART trees, random
//! forests, and the two-stage demand/price model built on them.

pub mod encoder;
pub mod error;
pub mod forest;
pub mod opportunity;
pub mod tree;

pub use encoder::CategoryEncoder;
pub use error::ModelError;
pub use forest::{ForestConfig, MaxFeatures, RandomForest};
pub use opportunity::{
    ModelConfig, OpportunityModel, OpportunityQuery, Prediction, Strategy, TrainingSummary,
    FEATURE_NAMES, HIGH_DEMAND_ABOVE, MODERATE_DEMAND_ABOVE,
};
pub use tree::{Criterion, DecisionTree, TreeNode, TreeParams};
