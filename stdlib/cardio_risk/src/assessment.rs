use crate::threshold::RiskThreshold;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    AtRisk,
    NotAtRisk,
}

impl RiskLabel {
    /// Banner shown to the user
    pub fn message(self) -> &'static str {
        match self {
            RiskLabel::AtRisk => "At Risk of Heart Disease!",
            RiskLabel::NotAtRisk => "Not at Risk.",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLabel::AtRisk => f.write_str("AT RISK"),
            RiskLabel::NotAtRisk => f.write_str("NOT AT RISK"),
        }
    }
}

/// Outcome of one evaluation, derived from the probability and threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub is_risk: bool,
    /// Positive-class probability, reported as the confidence
    pub probability: f64,
    pub threshold: RiskThreshold,
}

impl RiskAssessment {
    /// At risk iff `probability >= threshold`.
    pub fn decide(probability: f64, threshold: RiskThreshold) -> Self {
        Self {
            is_risk: probability >= threshold.value(),
            probability,
            threshold,
        }
    }

    pub fn label(&self) -> RiskLabel {
        if self.is_risk {
            RiskLabel::AtRisk
        } else {
            RiskLabel::NotAtRisk
        }
    }

    pub fn confidence(&self) -> f64 {
        self.probability
    }

    pub fn confidence_percent(&self) -> f64 {
        self.probability * 100.0
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (confidence {:.0}%, threshold {})",
            self.label(),
            self.confidence_percent(),
            self.threshold
        )
    }
}
