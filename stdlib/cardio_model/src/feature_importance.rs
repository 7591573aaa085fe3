//! Ranked feature importances

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named importance weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportanceEntry {
    pub feature: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportanceError {
    #[error("{estimator} models do not expose feature importances")]
    Unsupported { estimator: String },
    #[error("classifier reported {actual} importances for {expected} features")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Pair names with weights and sort by descending weight.
///
/// The sort is stable, so ties keep feature order.
pub fn rank(names: &[String], weights: &[f64]) -> Result<Vec<FeatureImportanceEntry>, ImportanceError> {
    if names.len() != weights.len() {
        return Err(ImportanceError::LengthMismatch {
            expected: names.len(),
            actual: weights.len(),
        });
    }
    let mut entries: Vec<FeatureImportanceEntry> = names
        .iter()
        .zip(weights)
        .map(|(feature, &weight)| FeatureImportanceEntry {
            feature: feature.clone(),
            weight,
        })
        .collect();
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let ranked = rank(&names(&["A", "B", "C", "D"]), &[0.1, 0.4, 0.1, 0.4]).unwrap();
        let order: Vec<&str> = ranked.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(order, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn length_mismatch_is_reported() {
        let err = rank(&names(&["A"]), &[0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            ImportanceError::LengthMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn unsupported_message() {
        let err = ImportanceError::Unsupported {
            estimator: "logistic_regression".into(),
        };
        assert_eq!(
            err.to_string(),
            "logistic_regression models do not expose feature importances"
        );
    }
}
