//! Loaded model: column order, transformer and estimator checked against each other

use crate::artifact::ModelArtifact;
use crate::backend::{Estimator, ModelError};
use crate::feature_importance::{rank, FeatureImportanceEntry, ImportanceError};
use crate::metadata::ModelMetadata;
use crate::transformer::ColumnTransformer;
use cardio_schema::{ColumnOrder, PatientRecord, SchemaDescriptor};
use log::{debug, info};
use std::fmt;
use std::path::Path;

/// A classifier ready to evaluate records.
///
/// Construction performs every schema check, so a `HeartModel` always encodes
/// records in its trained column order and hands the estimator a vector of the
/// width it expects.
pub struct HeartModel {
    metadata: ModelMetadata,
    order: ColumnOrder,
    transformer: ColumnTransformer,
    estimator: Box<dyn Estimator>,
}

impl fmt::Debug for HeartModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeartModel")
            .field("id", &self.metadata.id)
            .field("version", &self.metadata.version)
            .field("estimator", &self.estimator.kind())
            .field("features", &self.transformer.width())
            .finish()
    }
}

impl HeartModel {
    /// Assemble a model from parts. The transformer must have been built for
    /// `order`, and its output width must equal the estimator's input width.
    pub fn new(
        metadata: ModelMetadata,
        order: ColumnOrder,
        transformer: ColumnTransformer,
        estimator: Box<dyn Estimator>,
    ) -> Result<Self, ModelError> {
        let encoded: Vec<String> = transformer
            .encodings()
            .into_iter()
            .map(|e| e.column)
            .collect();
        if encoded != order.names() {
            return Err(ModelError::SchemaMismatch(format!(
                "transformer columns {encoded:?} differ from column order {:?}",
                order.names()
            )));
        }
        if transformer.width() != estimator.n_features() {
            return Err(ModelError::SchemaMismatch(format!(
                "transformer produces {} features but the {} estimator expects {}",
                transformer.width(),
                estimator.kind(),
                estimator.n_features()
            )));
        }
        Ok(Self {
            metadata,
            order,
            transformer,
            estimator,
        })
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let order = ColumnOrder::from_names(&artifact.columns)?;
        if let Some(schema) = &artifact.schema {
            schema.check()?;
        }
        let transformer = ColumnTransformer::new(&order, artifact.transformer)?;
        let estimator = artifact.estimator.build()?;
        Self::new(artifact.metadata, order, transformer, estimator)
    }

    /// Load and check a model artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let model = Self::from_artifact(ModelArtifact::read(path)?)?;
        info!(
            "loaded model '{}' v{} ({}, {} features) from {}",
            model.metadata.id,
            model.metadata.version,
            model.estimator.kind(),
            model.transformer.width(),
            path.display()
        );
        Ok(model)
    }

    /// Load a model and check it against an external schema descriptor file.
    pub fn load_with_schema(path: &Path, schema_path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(schema_path).map_err(|e| ModelError::Io {
            path: schema_path.to_path_buf(),
            source: e,
        })?;
        let external = SchemaDescriptor::from_json(&text)?;
        external.check()?;

        let artifact = ModelArtifact::read(path)?;
        if let Some(embedded) = &artifact.schema {
            if !same_columns(embedded, &external) {
                return Err(ModelError::SchemaMismatch(format!(
                    "{} disagrees with the schema embedded in {}",
                    schema_path.display(),
                    path.display()
                )));
            }
        }
        let model = Self::from_artifact(artifact)?;
        info!(
            "loaded model '{}' from {} (schema {})",
            model.metadata.id,
            path.display(),
            schema_path.display()
        );
        Ok(model)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn column_order(&self) -> &ColumnOrder {
        &self.order
    }

    pub fn estimator_kind(&self) -> &str {
        self.estimator.kind()
    }

    /// Post-encoding feature names
    pub fn feature_names(&self) -> &[String] {
        self.transformer.feature_names_out()
    }

    /// Encode a record into the estimator's feature vector.
    pub fn encode(&self, record: &PatientRecord) -> Result<Vec<f64>, ModelError> {
        self.transformer.transform(&record.values_in(&self.order))
    }

    /// Probability of the positive class. A NaN or out-of-range value from
    /// the estimator is an error.
    pub fn predict_proba(&self, record: &PatientRecord) -> Result<f64, ModelError> {
        let features = self.encode(record)?;
        let p = self.estimator.predict_proba(&features)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(ModelError::InvalidProbability(p));
        }
        debug!("{} -> p = {p:.4}", self.metadata.id);
        Ok(p)
    }

    /// Class decision: `1` iff the positive probability exceeds one half.
    pub fn predict(&self, record: &PatientRecord) -> Result<u8, ModelError> {
        Ok(u8::from(self.predict_proba(record)? > 0.5))
    }

    /// Importances ranked by descending weight.
    pub fn feature_importances(&self) -> Result<Vec<FeatureImportanceEntry>, ImportanceError> {
        let capability =
            self.estimator
                .as_feature_importance()
                .ok_or_else(|| ImportanceError::Unsupported {
                    estimator: self.estimator.kind().to_string(),
                })?;
        rank(self.feature_names(), &capability.feature_importances())
    }
}

fn same_columns(a: &SchemaDescriptor, b: &SchemaDescriptor) -> bool {
    let sorted = |v: &[String]| {
        let mut v = v.to_vec();
        v.sort();
        v
    };
    sorted(&a.numerical) == sorted(&b.numerical) && sorted(&a.categorical) == sorted(&b.categorical)
}
