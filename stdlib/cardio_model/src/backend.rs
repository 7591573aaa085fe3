//! Estimator traits and the model error type

use cardio_schema::{FieldKind, SchemaError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or running a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The column list or schema descriptor does not fit the record fields
    #[error("record schema error: {0}")]
    Schema(#[from] SchemaError),
    /// Parts of the artifact (or an external descriptor) disagree with each other
    #[error("model does not match its columns: {0}")]
    SchemaMismatch(String),
    #[error("invalid estimator: {0}")]
    InvalidEstimator(String),
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("column '{column}' has no category '{label}'")]
    UnknownCategory { column: &'static str, label: String },
    #[error("column '{column}' expects a {expected} value")]
    ValueKind {
        column: &'static str,
        expected: FieldKind,
    },
    #[error("classifier returned an invalid probability {0}")]
    InvalidProbability(f64),
    #[error("no model has been loaded")]
    NotLoaded,
    #[error("a model is already loaded")]
    AlreadyLoaded,
}

/// A trained binary classifier over encoded feature vectors.
///
/// Implementations are immutable after construction, so one instance can be
/// shared by every evaluation in the process.
pub trait Estimator: Send + Sync + fmt::Debug {
    /// Short identifier, e.g. `logistic_regression`
    fn kind(&self) -> &str;

    /// Width of the feature vector the estimator was trained on
    fn n_features(&self) -> usize;

    /// Probability of the positive class
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Importance capability, when the estimator carries one
    fn as_feature_importance(&self) -> Option<&dyn HasFeatureImportance> {
        None
    }
}

/// Per-feature weights read from a trained estimator's internal state.
pub trait HasFeatureImportance {
    /// One weight per encoded feature, in feature order
    fn feature_importances(&self) -> Vec<f64>;
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_check_reports_both_sizes() {
        let err = check_width(3, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "expected 3 features, got 2");
        assert!(check_width(2, &[1.0, 2.0]).is_ok());
    }

    #[test]
    fn schema_errors_are_told_apart() {
        let record = ModelError::from(SchemaError::MissingColumn("SleepTime"));
        let model = ModelError::SchemaMismatch("transformer step 3 is for 'Stroke'".into());
        assert_eq!(
            record.to_string(),
            "record schema error: column 'SleepTime' is missing"
        );
        assert_eq!(
            model.to_string(),
            "model does not match its columns: transformer step 3 is for 'Stroke'"
        );
    }

    #[test]
    fn missing_artifact_message_names_path() {
        let err = ModelError::ArtifactMissing(PathBuf::from("models/none.json"));
        assert_eq!(
            err.to_string(),
            "model artifact not found: models/none.json"
        );
    }
}
