//! Classifier artifacts for heart-disease risk assessment
//!
//! A model is a column transformer (turning a record into a feature vector)
//! followed by an estimator (turning the feature vector into the probability
//! of the positive class). Both are loaded from a declarative JSON artifact and
//! checked against the record schema before anything is evaluated.

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod feature_importance;
pub mod handle;
pub mod metadata;
pub mod pipeline;
pub mod transformer;

pub use artifact::{EstimatorSpec, ModelArtifact};
pub use backend::{Estimator, HasFeatureImportance, ModelError};
pub use backends::{DecisionTree, LogisticRegression, RandomForest, TreeNode};
pub use feature_importance::{rank, FeatureImportanceEntry, ImportanceError};
pub use handle::{install, load_and_install, loaded};
pub use metadata::{ModelMetadata, ModelType, ModelVersion};
pub use pipeline::HeartModel;
pub use transformer::{CategoricalEncoding, ColumnEncoding, ColumnTransformer, Encoder};
