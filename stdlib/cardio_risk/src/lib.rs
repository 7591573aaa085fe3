//! Risk evaluation for heart-disease assessment.
//!
//! Turns a collected record and a user threshold into a binary label with the
//! classifier's confidence, and optionally a ranked feature-importance panel.

pub mod assessment;
pub mod evaluate;
pub mod importance;
pub mod submission;
pub mod threshold;

pub use assessment::{RiskAssessment, RiskLabel};
pub use evaluate::evaluate;
pub use importance::{importance_panel, ImportancePanel, DEFAULT_TOP_N};
pub use submission::{
    assess_record, assess_submission, AssessOptions, AssessmentReport, SubmissionError,
};
pub use threshold::{RiskThreshold, ThresholdError};
