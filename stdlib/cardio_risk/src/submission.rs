//! One user action: collect, evaluate, and optionally rank importances

use crate::assessment::RiskAssessment;
use crate::evaluate::evaluate;
use crate::importance::{importance_panel, ImportancePanel, DEFAULT_TOP_N};
use crate::threshold::RiskThreshold;
use cardio_model::{HeartModel, ModelError};
use cardio_schema::{collect, CollectError, PatientRecord, Submission};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission was rejected before reaching the model
    #[error(transparent)]
    Blocked(#[from] CollectError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SubmissionError {
    /// Whether the user can fix this by changing the input
    pub fn is_blocked_input(&self) -> bool {
        matches!(self, SubmissionError::Blocked(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessOptions {
    pub importances: bool,
    pub top_n: usize,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            importances: false,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub model: String,
    pub assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importances: Option<ImportancePanel>,
}

/// Evaluate an already-collected record.
pub fn assess_record(
    record: &PatientRecord,
    threshold: RiskThreshold,
    model: &HeartModel,
    options: AssessOptions,
) -> Result<AssessmentReport, ModelError> {
    let assessment = evaluate(record, threshold, model)?;
    let importances = options
        .importances
        .then(|| importance_panel(model, options.top_n));
    Ok(AssessmentReport {
        model: model.metadata().id.clone(),
        assessment,
        importances,
    })
}

pub fn assess_submission(
    submission: &Submission,
    threshold: RiskThreshold,
    model: &HeartModel,
    options: AssessOptions,
) -> Result<AssessmentReport, SubmissionError> {
    let record = collect(submission)?;
    Ok(assess_record(&record, threshold, model, options)?)
}
