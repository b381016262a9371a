//! CART decision tree (binary splits on numeric features).
//!
//! Nodes are stored flat in pre-order. A node with `feature == -1` is a leaf
//! whose `value` is the prediction: the fraction of positive labels for a
//! classification tree, the mean target for a regression tree.
//!
//! Traversal: at an internal node go left when `row[feature] <= threshold`
//! (or the feature is missing/NaN), right otherwise.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Split quality measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Gini impurity over 0/1 labels.
    Gini,
    /// Mean squared error (variance) of a continuous target.
    SquaredError,
}

impl Criterion {
    /// Impurity of a node given the sum and sum of squares of its targets.
    fn impurity(&self, sum: f64, sum_sq: f64, n: f64) -> f64 {
        if n <= 0.0 {
            return 0.0;
        }
        let mean = sum / n;
        match self {
            Self::Gini => 2.0 * mean * (1.0 - mean),
            Self::SquaredError => (sum_sq / n - mean * mean).max(0.0),
        }
    }
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub criterion: Criterion,
    /// Candidate features examined per split before falling back to the rest.
    pub max_features: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

/// A single node in the flattened tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index to split on (-1 for leaf nodes).
    pub feature: i32,
    /// Threshold value for the split.
    pub threshold: f64,
    /// Index of left child (-1 for leaf nodes).
    pub left: i32,
    /// Index of right child (-1 for leaf nodes).
    pub right: i32,
    /// Mean target of the training samples that reached this node.
    pub value: f64,
    /// Training samples (with bootstrap duplicates) that reached this node.
    pub samples: usize,
}

impl TreeNode {
    fn leaf(value: f64, samples: usize) -> Self {
        Self {
            feature: -1,
            threshold: 0.0,
            left: -1,
            right: -1,
            value,
            samples,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature == -1
    }
}

/// A fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Sample-weighted child impurity; lower is better.
    score: f64,
}

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    params: TreeParams,
    n_features: usize,
    rng: &'a mut StdRng,
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Fit a tree on the rows selected by `sample`, which may repeat indices.
    ///
    /// Returns a single-leaf tree with value 0 when `sample` is empty.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        sample: &[usize],
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        let mut builder = Builder {
            x,
            y,
            params,
            n_features,
            rng,
            nodes: Vec::new(),
        };
        let mut indices = sample.to_vec();
        if indices.is_empty() {
            builder.nodes.push(TreeNode::leaf(0.0, 0));
        } else {
            builder.grow(&mut indices, 0);
        }
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            let node = &nodes[idx];
            if node.is_leaf() {
                0
            } else {
                1 + walk(nodes, node.left as usize).max(walk(nodes, node.right as usize))
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    #[inline]
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node_idx = 0usize;
        loop {
            let node = &self.nodes[node_idx];
            if node.is_leaf() {
                return node.value;
            }
            let feature_val = row.get(node.feature as usize).copied().unwrap_or(f64::NAN);
            if feature_val.is_nan() || feature_val <= node.threshold {
                node_idx = node.left as usize;
            } else {
                node_idx = node.right as usize;
            }
        }
    }
}

impl Builder<'_> {
    /// Grow the subtree for `indices`, returning its root node index.
    fn grow(&mut self, indices: &mut [usize], depth: usize) -> usize {
        let n = indices.len();
        let (sum, sum_sq) = self.target_sums(indices);
        let value = sum / n as f64;
        let impurity = self.params.criterion.impurity(sum, sum_sq, n as f64);

        let node_idx = self.nodes.len();
        self.nodes.push(TreeNode::leaf(value, n));

        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if n < self.params.min_samples_split.max(2) || depth_reached || impurity <= 1e-12 {
            return node_idx;
        }

        let Some(split) = self.best_split(indices) else {
            return node_idx;
        };

        let mid = partition(indices, |&i| self.x[i][split.feature] <= split.threshold);
        let (left_idx, right_idx) = indices.split_at_mut(mid);
        let left = self.grow(left_idx, depth + 1);
        let right = self.grow(right_idx, depth + 1);

        let node = &mut self.nodes[node_idx];
        node.feature = split.feature as i32;
        node.threshold = split.threshold;
        node.left = left as i32;
        node.right = right as i32;
        node_idx
    }

    fn target_sums(&self, indices: &[usize]) -> (f64, f64) {
        indices.iter().fold((0.0, 0.0), |(s, sq), &i| {
            let v = self.y[i];
            (s + v, sq + v * v)
        })
    }

    /// Examine `max_features` random features; if none of them can split the
    /// node (all constant), keep drawing from the remaining features.
    fn best_split(&mut self, indices: &[usize]) -> Option<SplitCandidate> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(&mut *self.rng);
        let budget = self.params.max_features.clamp(1, self.n_features.max(1));

        let mut best: Option<SplitCandidate> = None;
        for (visited, &feature) in features.iter().enumerate() {
            if visited >= budget && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(indices, feature) {
                if best.as_ref().map_or(true, |b| candidate.score < b.score) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_split_on(&self, indices: &[usize], feature: usize) -> Option<SplitCandidate> {
        let mut order: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (self.x[i][feature], self.y[i]))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = order.len();
        let (total, total_sq) = order
            .iter()
            .fold((0.0, 0.0), |(s, sq), &(_, v)| (s + v, sq + v * v));

        let criterion = self.params.criterion;
        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        let mut best: Option<SplitCandidate> = None;

        for pos in 0..n - 1 {
            let (xv, yv) = order[pos];
            left_sum += yv;
            left_sq += yv * yv;

            let next = order[pos + 1].0;
            if next <= xv {
                continue;
            }

            let n_left = (pos + 1) as f64;
            let n_right = (n - pos - 1) as f64;
            let score = n_left * criterion.impurity(left_sum, left_sq, n_left)
                + n_right * criterion.impurity(total - left_sum, total_sq - left_sq, n_right);

            if best.as_ref().map_or(true, |b| score < b.score) {
                let mut threshold = xv + (next - xv) / 2.0;
                if threshold >= next {
                    threshold = xv;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
        best
    }
}

/// In-place partition; returns the count of elements satisfying `pred`,
/// which are moved to the front.
fn partition<F: Fn(&usize) -> bool>(items: &mut [usize], pred: F) -> usize {
    let mut boundary = 0;
    for i in 0..items.len() {
        if pred(&items[i]) {
            items.swap(boundary, i);
            boundary += 1;
        }
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params(criterion: Criterion) -> TreeParams {
        TreeParams {
            criterion,
            max_features: 2,
            max_depth: None,
            min_samples_split: 2,
        }
    }

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn separable_classification_is_learned_exactly() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let y: Vec<f64> = (0..20).map(|i| if i >= 10 { 1.0 } else { 0.0 }).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let tree = DecisionTree::fit(&x, &y, &all(20), params(Criterion::Gini), &mut rng);

        assert_eq!(tree.predict(&[3.0, 0.0]), 0.0);
        assert_eq!(tree.predict(&[15.0, 0.0]), 1.0);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.nodes()[0].threshold, 9.5);
    }

    #[test]
    fn constant_features_produce_single_leaf_with_mean() {
        let x = vec![vec![1.0, 1.0]; 10];
        let y: Vec<f64> = (0..10).map(|i| if i < 6 { 1.0 } else { 0.0 }).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let tree = DecisionTree::fit(&x, &y, &all(10), params(Criterion::Gini), &mut rng);

        assert_eq!(tree.nodes().len(), 1);
        assert!((tree.predict(&[1.0, 1.0]) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn regression_tree_fits_step_function() {
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![0.0, i as f64]).collect();
        let y: Vec<f64> = (0..40).map(|i| if i < 20 { 100.0 } else { 300.0 }).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let tree = DecisionTree::fit(&x, &y, &all(40), params(Criterion::SquaredError), &mut rng);

        assert!((tree.predict(&[0.0, 5.0]) - 100.0).abs() < 1e-9);
        assert!((tree.predict(&[0.0, 35.0]) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_unsampled_feature_when_sampled_ones_are_constant() {
        // feature 0 and 1 constant; only feature 2 separates
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![5.0, 5.0, i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| if i < 5 { 0.0 } else { 1.0 }).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = TreeParams {
                max_features: 1,
                ..params(Criterion::Gini)
            };
            let tree = DecisionTree::fit(&x, &y, &all(10), p, &mut rng);
            assert_eq!(tree.predict(&[5.0, 5.0, 1.0]), 0.0, "seed {seed}");
            assert_eq!(tree.predict(&[5.0, 5.0, 8.0]), 1.0, "seed {seed}");
        }
    }

    #[test]
    fn max_depth_limits_growth() {
        let x: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..64).map(|i| (i % 2) as f64).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let p = TreeParams {
            criterion: Criterion::Gini,
            max_features: 1,
            max_depth: Some(3),
            min_samples_split: 2,
        };
        let tree = DecisionTree::fit(&x, &y, &all(64), p, &mut rng);
        assert!(tree.depth() <= 3);
    }

    #[test]
    fn bootstrap_duplicates_weight_the_leaf() {
        let x = vec![vec![0.0], vec![0.0]];
        let y = vec![1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(1);
        // row 0 drawn three times, row 1 once
        let tree = DecisionTree::fit(&x, &y, &[0, 0, 0, 1], params(Criterion::Gini), &mut rng);
        assert!((tree.predict(&[0.0]) - 0.75).abs() < 1e-12);
        assert_eq!(tree.nodes()[0].samples, 4);
    }

    #[test]
    fn nan_goes_left() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| if i < 5 { 0.0 } else { 1.0 }).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&x, &y, &all(10), params(Criterion::Gini), &mut rng);
        assert_eq!(tree.predict(&[f64::NAN]), 0.0);
        assert_eq!(tree.predict(&[]), 0.0);
    }

    #[test]
    fn empty_sample_gives_zero_leaf() {
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&[], &[], &[], params(Criterion::Gini), &mut rng);
        assert_eq!(tree.predict(&[1.0]), 0.0);
    }
}
