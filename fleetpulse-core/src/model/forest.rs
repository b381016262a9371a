//! Random forest ensembles built from [`DecisionTree`]s.
//!
//! Each tree is fit on a bootstrap resample of the training rows with a random
//! feature subset examined at every split. Predictions average the trees:
//! for a classifier this is the mean leaf fraction of positive labels (the
//! class-1 probability), for a regressor the mean leaf target.
//!
//! Trees are fit in parallel with rayon. Tree `i` draws from
//! `SeedHierarchy::rng_for(stream, i)`, so the fitted forest does not depend
//! on thread count or scheduling.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tree::{Criterion, DecisionTree, TreeParams};
use crate::rng::SeedHierarchy;

/// How many features to examine per split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `max(1, floor(sqrt(n_features)))`.
    Sqrt,
    /// Every feature.
    All,
    /// A fixed count, capped at the number of features.
    Count(usize),
}

impl MaxFeatures {
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = match self {
            Self::Sqrt => (n_features as f64).sqrt().floor() as usize,
            Self::All => n_features,
            Self::Count(k) => (*k).min(n_features),
        };
        n.max(1)
    }
}

/// Forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_features: MaxFeatures,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_features: MaxFeatures::All,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Defaults for a demand classifier: sqrt feature sampling.
    pub fn classifier() -> Self {
        Self {
            max_features: MaxFeatures::Sqrt,
            ..Self::default()
        }
    }

    /// Defaults for a price regressor: all features at every split.
    pub fn regressor() -> Self {
        Self::default()
    }
}

/// A fitted forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    criterion: Criterion,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit a forest. `stream` names the seed stream so two forests sharing a
    /// master seed (classifier and regressor) still draw independently.
    ///
    /// `x` must be non-empty and rectangular; `y` must have one target per row.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        criterion: Criterion,
        config: &ForestConfig,
        stream: &str,
    ) -> Self {
        let n_rows = x.len().min(y.len());
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        let params = TreeParams {
            criterion,
            max_features: config.max_features.resolve(n_features),
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
        };
        let seeds = SeedHierarchy::new(config.seed);

        let trees: Vec<DecisionTree> = (0..config.n_estimators.max(1) as u64)
            .into_par_iter()
            .map(|i| {
                let mut rng = seeds.rng_for(stream, i);
                let sample: Vec<usize> = if config.bootstrap {
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                DecisionTree::fit(x, y, &sample, params, &mut rng)
            })
            .collect();

        Self {
            criterion,
            n_features,
            trees,
        }
    }

    /// Mean of the per-tree predictions.
    pub fn predict(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}
