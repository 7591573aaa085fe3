//! Decision threshold on the positive-class probability

use cardio_schema::{DEFAULT_THRESHOLD, THRESHOLD_MAX, THRESHOLD_MIN, THRESHOLD_STEP};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold must be a number, got '{0}'")]
    NotANumber(String),
    #[error("threshold {0} is outside [{min}, {max}]", min = THRESHOLD_MIN, max = THRESHOLD_MAX)]
    OutOfRange(f64),
}

/// A probability cutoff in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskThreshold(f64);

impl RiskThreshold {
    pub const DEFAULT: RiskThreshold = RiskThreshold(DEFAULT_THRESHOLD);

    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value) {
            return Err(ThresholdError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Snap a raw slider position to the nearest slider step.
    pub fn from_slider(raw: f64) -> Result<Self, ThresholdError> {
        let steps = (1.0 / THRESHOLD_STEP).round();
        Self::new((raw * steps).round() / steps)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for RiskThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for RiskThreshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskThreshold> for f64 {
    fn from(t: RiskThreshold) -> Self {
        t.0
    }
}

impl FromStr for RiskThreshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ThresholdError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for RiskThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(RiskThreshold::new(0.0).is_ok());
        assert!(RiskThreshold::new(1.0).is_ok());
        assert_eq!(
            RiskThreshold::new(1.01),
            Err(ThresholdError::OutOfRange(1.01))
        );
        assert!(RiskThreshold::new(f64::NAN).is_err());
    }

    #[test]
    fn default_is_one_half() {
        assert_eq!(RiskThreshold::default().value(), 0.5);
        assert_eq!(RiskThreshold::default().to_string(), "0.50");
    }

    #[test]
    fn slider_snaps_to_step() {
        assert_eq!(RiskThreshold::from_slider(0.734).unwrap().value(), 0.73);
        assert_eq!(RiskThreshold::from_slider(0.736).unwrap().value(), 0.74);
        assert_eq!(RiskThreshold::from_slider(1.004).unwrap().value(), 1.0);
        assert!(RiskThreshold::from_slider(1.2).is_err());
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("0.8".parse::<RiskThreshold>().unwrap().value(), 0.8);
        assert_eq!(
            "high".parse::<RiskThreshold>(),
            Err(ThresholdError::NotANumber("high".into()))
        );
        assert_eq!(
            "-0.1".parse::<RiskThreshold>().unwrap_err().to_string(),
            "threshold -0.1 is outside [0, 1]"
        );
    }

    #[test]
    fn deserialization_is_checked() {
        assert_eq!(
            serde_json::from_str::<RiskThreshold>("0.25").unwrap().value(),
            0.25
        );
        assert!(serde_json::from_str::<RiskThreshold>("2.0").is_err());
    }
}
