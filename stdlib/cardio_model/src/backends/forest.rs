//! Random forest of binary decision trees.
//!
//! Trees are stored as flat node arrays with node 0 as the root. A sample goes
//! to the left child when `x[feature] <= threshold`. Leaves hold the weighted
//! class counts `[negative, positive]` seen during training, and the forest
//! probability is the mean of the per-tree positive fractions.
//!
//! Importances are mean decrease in impurity: each split credits its feature
//! with `samples * impurity` minus the same quantity for both children. Each
//! tree's vector is normalized, the trees are averaged, and the result is
//! normalized again so the weights sum to one.

use crate::backend::{check_width, Estimator, HasFeatureImportance, ModelError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        impurity: f64,
        samples: f64,
    },
    Leaf {
        value: [f64; 2],
        impurity: f64,
        samples: f64,
    },
}

impl TreeNode {
    fn weighted_impurity(&self) -> f64 {
        match self {
            TreeNode::Split {
                impurity, samples, ..
            }
            | TreeNode::Leaf {
                impurity, samples, ..
            } => impurity * samples,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>, n_features: usize) -> Result<Self, ModelError> {
        let tree = Self { nodes };
        tree.check(n_features)?;
        Ok(tree)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Children must point forward, split features must be in range and leaves
    /// must carry usable counts.
    pub fn check(&self, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidEstimator("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if feature >= n_features {
                        return Err(ModelError::InvalidEstimator(format!(
                            "node {i} splits on feature {feature} of {n_features}"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::InvalidEstimator(format!(
                            "node {i} has a NaN threshold"
                        )));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(ModelError::InvalidEstimator(format!(
                                "node {i} has invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value, .. } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0 {
                        return Err(ModelError::InvalidEstimator(format!(
                            "leaf {i} has unusable class counts {value:?}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Fraction of positive training samples in the leaf `features` lands in
    pub fn positive_fraction(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                }) => {
                    let x = features.get(*feature).ok_or(ModelError::FeatureCount {
                        expected: *feature + 1,
                        actual: features.len(),
                    })?;
                    index = if *x <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Some(TreeNode::Leaf { value, .. }) => {
                    return Ok(value[1] / (value[0] + value[1]));
                }
                None => {
                    return Err(ModelError::InvalidEstimator(format!(
                        "traversal reached missing node {index}"
                    )))
                }
            }
        }
    }

    /// Normalized impurity decrease per feature for this tree
    pub fn impurity_importances(&self, n_features: usize) -> Vec<f64> {
        let mut importances = vec![0.0; n_features];
        for node in &self.nodes {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                let (Some(l), Some(r)) = (self.nodes.get(left), self.nodes.get(right)) else {
                    continue;
                };
                let decrease =
                    node.weighted_impurity() - l.weighted_impurity() - r.weighted_impurity();
                if let Some(slot) = importances.get_mut(feature) {
                    *slot += decrease.max(0.0);
                }
            }
        }
        normalize(&mut importances);
        importances
    }
}

fn normalize(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter_mut().for_each(|v| *v /= total);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ModelError> {
        let forest = Self { n_features, trees };
        forest.check()?;
        Ok(forest)
    }

    pub fn check(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::InvalidEstimator(
                "random forest declares no features".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidEstimator("random forest has no trees".into()));
        }
        self.trees.iter().try_for_each(|t| t.check(self.n_features))
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Estimator for RandomForest {
    fn kind(&self) -> &str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.n_features, features)?;
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.positive_fraction(features)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    fn as_feature_importance(&self) -> Option<&dyn HasFeatureImportance> {
        Some(self)
    }
}

impl HasFeatureImportance for RandomForest {
    fn feature_importances(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (m, v) in mean.iter_mut().zip(tree.impurity_importances(self.n_features)) {
                *m += v;
            }
        }
        let n = self.trees.len().max(1) as f64;
        mean.iter_mut().for_each(|m| *m /= n);
        normalize(&mut mean);
        mean
    }
}
