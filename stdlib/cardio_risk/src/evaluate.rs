use crate::assessment::RiskAssessment;
use crate::threshold::RiskThreshold;
use cardio_model::{HeartModel, ModelError};
use cardio_schema::PatientRecord;
use log::debug;

/// Score `record` once and decide against `threshold`.
///
/// The record is encoded in the model's trained column order; an invalid
/// probability from the estimator is returned as an error.
pub fn evaluate(
    record: &PatientRecord,
    threshold: RiskThreshold,
    model: &HeartModel,
) -> Result<RiskAssessment, ModelError> {
    let probability = model.predict_proba(record)?;
    let assessment = RiskAssessment::decide(probability, threshold);
    debug!(
        "p = {probability:.4} vs threshold {threshold} -> {}",
        assessment.label()
    );
    Ok(assessment)
}
