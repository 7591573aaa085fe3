// Validation traits shared by the record and form types

use thiserror::Error;

/// Simple validation trait used by domain types
pub trait Validatable {
    /// Returns the first problem found, if any.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required.")]
    MissingField { field: &'static str },
    #[error("Field '{field}' value {actual} is out of allowed range [{min}, {max}].")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        actual: f64,
    },
    #[error("Field '{field}' must be a finite number.")]
    NotFinite { field: &'static str },
    #[error("Field '{field}' expects a number, got '{raw}'.")]
    NotANumber { field: &'static str, raw: String },
    #[error("Field '{field}' has no option '{label}'.")]
    UnknownLabel { field: &'static str, label: String },
    #[error("Unknown field '{name}'.")]
    UnknownField { name: String },
    #[error("Field '{name}' is given twice, as '{first}' and '{second}'.")]
    DuplicateField {
        name: String,
        first: String,
        second: String,
    },
}

impl ValidationError {
    /// Name of the field the error refers to, when it refers to a known one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::UnknownLabel { field, .. } => Some(*field),
            ValidationError::DuplicateField { name, .. } => Some(name.as_str()),
            ValidationError::UnknownField { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_field_and_bounds() {
        let err = ValidationError::OutOfRange {
            field: "SleepTime",
            min: 0.0,
            max: 24.0,
            actual: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "Field 'SleepTime' value 25 is out of allowed range [0, 24]."
        );
        assert_eq!(err.field(), Some("SleepTime"));
    }

    #[test]
    fn unknown_field_has_no_field_name() {
        let err = ValidationError::UnknownField {
            name: "Cholesterol".into(),
        };
        assert_eq!(err.field(), None);
    }
}
