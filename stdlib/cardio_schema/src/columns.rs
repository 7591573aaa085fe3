//! Column-order table and the declarative schema descriptor.
//!
//! A trained classifier expects its inputs in a fixed column order. That order
//! is resolved once, against the closed set of record fields, so a record can
//! never be laid out against misnamed or missing columns.

use crate::field::{Field, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("column '{0}' is listed more than once")]
    DuplicateColumn(String),
    #[error("column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("column '{column}' is declared {declared} but the record field is {expected}")]
    KindMismatch {
        column: String,
        declared: FieldKind,
        expected: FieldKind,
    },
    #[error("invalid schema descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fields in the order a model consumes them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    fields: Vec<Field>,
}

impl ColumnOrder {
    /// The order of [`Field::ALL`].
    pub fn canonical() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
        }
    }

    /// Resolve a list of trained column names. Every record field must appear
    /// exactly once and nothing else may appear.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let field =
                Field::from_name(name).ok_or_else(|| SchemaError::UnknownColumn(name.into()))?;
            if !seen.insert(field) {
                return Err(SchemaError::DuplicateColumn(name.into()));
            }
            fields.push(field);
        }
        if let Some(missing) = Field::ALL.iter().find(|f| !seen.contains(*f)) {
            return Err(SchemaError::MissingColumn(missing.name()));
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Plain key-to-list metadata naming the numerical and categorical columns
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub numerical: Vec<String>,
    pub categorical: Vec<String>,
}

impl SchemaDescriptor {
    /// Descriptor matching the record fields.
    pub fn canonical() -> Self {
        let pick = |kind: FieldKind| -> Vec<String> {
            Field::ALL
                .iter()
                .filter(|f| f.kind() == kind)
                .map(|f| f.name().to_string())
                .collect()
        };
        Self {
            numerical: pick(FieldKind::Numerical),
            categorical: pick(FieldKind::Categorical),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check that every record field is declared once, under its own kind.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        let declared = self
            .numerical
            .iter()
            .map(|n| (n, FieldKind::Numerical))
            .chain(self.categorical.iter().map(|c| (c, FieldKind::Categorical)));
        for (name, kind) in declared {
            let field =
                Field::from_name(name).ok_or_else(|| SchemaError::UnknownColumn(name.clone()))?;
            if !seen.insert(field) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
            if field.kind() != kind {
                return Err(SchemaError::KindMismatch {
                    column: name.clone(),
                    declared: kind,
                    expected: field.kind(),
                });
            }
        }
        match Field::ALL.iter().find(|f| !seen.contains(*f)) {
            Some(missing) => Err(SchemaError::MissingColumn(missing.name())),
            None => Ok(()),
        }
    }

    pub fn kind_of(&self, column: &str) -> Option<FieldKind> {
        if self.numerical.iter().any(|n| n == column) {
            Some(FieldKind::Numerical)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(FieldKind::Categorical)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_order_round_trips_through_names() {
        let order = ColumnOrder::canonical();
        let again = ColumnOrder::from_names(&order.names()).unwrap();
        assert_eq!(order, again);
        assert_eq!(order.len(), 17);
    }

    #[test]
    fn permuted_order_is_kept() {
        let mut names = ColumnOrder::canonical().names();
        names.reverse();
        let order = ColumnOrder::from_names(&names).unwrap();
        assert_eq!(order.fields()[0], Field::SkinCancer);
        assert_eq!(order.fields()[16], Field::Bmi);
    }

    #[test]
    fn unknown_duplicate_and_missing_columns_are_rejected() {
        let mut names = ColumnOrder::canonical().names();
        names[0] = "Cholesterol";
        assert!(matches!(
            ColumnOrder::from_names(&names),
            Err(SchemaError::UnknownColumn(c)) if c == "Cholesterol"
        ));

        let mut names = ColumnOrder::canonical().names();
        names[1] = "BMI";
        assert!(matches!(
            ColumnOrder::from_names(&names),
            Err(SchemaError::DuplicateColumn(c)) if c == "BMI"
        ));

        let mut names = ColumnOrder::canonical().names();
        names.pop();
        assert!(matches!(
            ColumnOrder::from_names(&names),
            Err(SchemaError::MissingColumn("SkinCancer"))
        ));
    }

    #[test]
    fn descriptor_parses_and_checks() {
        let text = serde_json::to_string(&SchemaDescriptor::canonical()).unwrap();
        let descriptor = SchemaDescriptor::from_json(&text).unwrap();
        descriptor.check().unwrap();
        assert_eq!(descriptor.kind_of("BMI"), Some(FieldKind::Numerical));
        assert_eq!(descriptor.kind_of("Race"), Some(FieldKind::Categorical));
        assert_eq!(descriptor.kind_of("Pulse"), None);
    }

    #[test]
    fn descriptor_kind_mismatch_is_rejected() {
        let mut descriptor = SchemaDescriptor::canonical();
        let pos = descriptor
            .categorical
            .iter()
            .position(|c| c == "Sex")
            .unwrap();
        let sex = descriptor.categorical.remove(pos);
        descriptor.numerical.push(sex);
        assert!(matches!(
            descriptor.check(),
            Err(SchemaError::KindMismatch { column, .. }) if column == "Sex"
        ));
    }
}
