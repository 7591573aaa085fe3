//! Logistic regression: p = sigmoid(W·x + b)

use crate::backend::{check_width, Estimator, ModelError};
use serde::{Deserialize, Serialize};

/// Binary logistic regression with one coefficient per encoded feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.check()?;
        Ok(model)
    }

    /// Reject empty or non-finite parameters.
    pub fn check(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidEstimator(
                "logistic regression has no coefficients".into(),
            ));
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(ModelError::InvalidEstimator(format!(
                "coefficient {i} is not finite"
            )));
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::InvalidEstimator("intercept is not finite".into()));
        }
        Ok(())
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Log-odds of the positive class
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_width(self.coefficients.len(), features)?;
        Ok(features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Estimator for LogisticRegression {
    fn kind(&self) -> &str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        Ok(sigmoid(self.decision_function(features)?))
    }
}
