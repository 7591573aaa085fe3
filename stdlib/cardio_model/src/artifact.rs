//! Declarative model artifact as stored on disk

use crate::backend::{Estimator, ModelError};
use crate::backends::{LogisticRegression, RandomForest};
use crate::metadata::ModelMetadata;
use crate::transformer::ColumnEncoding;
use cardio_schema::SchemaDescriptor;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Serialized estimator parameters, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl EstimatorSpec {
    /// Check the parameters and box the estimator.
    pub fn build(self) -> Result<Box<dyn Estimator>, ModelError> {
        match self {
            EstimatorSpec::LogisticRegression(lr) => {
                lr.check()?;
                Ok(Box::new(lr))
            }
            EstimatorSpec::RandomForest(rf) => {
                rf.check()?;
                Ok(Box::new(rf))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    /// Training column order
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDescriptor>,
    pub transformer: Vec<ColumnEncoding>,
    pub estimator: EstimatorSpec,
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read an artifact file; a missing file is `ArtifactMissing`.
    pub fn read(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelError::ArtifactMissing(path.to_path_buf()),
            _ => ModelError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_json(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
