//! Estimator implementations that can be restored from an artifact

pub mod forest;
pub mod logistic;

pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use logistic::LogisticRegression;
