//! Column transformer: record values in, encoded feature vector out.
//!
//! Each step encodes one column. Output features are laid out step by step,
//! and the steps must name the columns in the classifier's column order.

use crate::backend::ModelError;
use cardio_schema::{ColumnOrder, Field, FieldKind, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Encoding applied to a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Encoder {
    /// Numeric value used as-is
    Passthrough,
    /// `(x - mean) / scale`
    StandardScaler { mean: f64, scale: f64 },
    /// One indicator per category; the first is dropped for two-category columns
    /// when `drop_binary` is set
    OneHot {
        categories: Vec<String>,
        #[serde(default)]
        drop_binary: bool,
    },
    /// Position of the label in `categories`
    Ordinal { categories: Vec<String> },
}

impl Encoder {
    fn accepts(&self) -> FieldKind {
        match self {
            Encoder::Passthrough | Encoder::StandardScaler { .. } => FieldKind::Numerical,
            Encoder::OneHot { .. } | Encoder::Ordinal { .. } => FieldKind::Categorical,
        }
    }

    fn drops_first(&self) -> bool {
        matches!(self, Encoder::OneHot { categories, drop_binary: true } if categories.len() == 2)
    }
}

/// One serialized transformer step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEncoding {
    pub column: String,
    pub encoder: Encoder,
}

/// Default categorical encodings for building a transformer over a column order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalEncoding {
    OneHot { drop_binary: bool },
    /// Codes follow each domain's declared label order
    Ordinal,
}

#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    steps: Vec<(Field, Encoder)>,
    feature_names: Vec<String>,
}

impl ColumnTransformer {
    /// Build and validate a transformer for `order`.
    pub fn new(order: &ColumnOrder, encodings: Vec<ColumnEncoding>) -> Result<Self, ModelError> {
        if encodings.len() != order.len() {
            return Err(ModelError::SchemaMismatch(format!(
                "transformer has {} steps for {} columns",
                encodings.len(),
                order.len()
            )));
        }

        let mut steps = Vec::with_capacity(encodings.len());
        for (position, (encoding, &field)) in encodings.into_iter().zip(order.fields()).enumerate() {
            if encoding.column != field.name() {
                return Err(ModelError::SchemaMismatch(format!(
                    "transformer step {position} encodes '{}' but column {position} is '{}'",
                    encoding.column,
                    field.name()
                )));
            }
            check_encoder(field, &encoding.encoder)?;
            steps.push((field, encoding.encoder));
        }

        let feature_names = steps
            .iter()
            .flat_map(|(field, encoder)| output_names(*field, encoder))
            .collect();
        Ok(Self {
            steps,
            feature_names,
        })
    }

    /// Transformer with numeric passthrough and a uniform categorical encoding.
    pub fn uniform(order: &ColumnOrder, categorical: CategoricalEncoding) -> Self {
        let steps: Vec<(Field, Encoder)> = order
            .fields()
            .iter()
            .map(|&field| {
                let encoder = match (field.labels(), categorical) {
                    (None, _) => Encoder::Passthrough,
                    (Some(labels), CategoricalEncoding::OneHot { drop_binary }) => Encoder::OneHot {
                        categories: labels.iter().map(|l| l.to_string()).collect(),
                        drop_binary,
                    },
                    (Some(labels), CategoricalEncoding::Ordinal) => Encoder::Ordinal {
                        categories: labels.iter().map(|l| l.to_string()).collect(),
                    },
                };
                (field, encoder)
            })
            .collect();
        let feature_names = steps
            .iter()
            .flat_map(|(field, encoder)| output_names(*field, encoder))
            .collect();
        Self {
            steps,
            feature_names,
        }
    }

    /// Number of encoded features
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    /// Names of the encoded features, e.g. `BMI`, `Sex_Male`
    pub fn feature_names_out(&self) -> &[String] {
        &self.feature_names
    }

    pub fn encodings(&self) -> Vec<ColumnEncoding> {
        self.steps
            .iter()
            .map(|(field, encoder)| ColumnEncoding {
                column: field.name().to_string(),
                encoder: encoder.clone(),
            })
            .collect()
    }

    /// Encode one row of values given in column order.
    pub fn transform(&self, values: &[FieldValue]) -> Result<Vec<f64>, ModelError> {
        if values.len() != self.steps.len() {
            return Err(ModelError::FeatureCount {
                expected: self.steps.len(),
                actual: values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.width());
        for ((field, encoder), value) in self.steps.iter().zip(values) {
            encode_into(*field, encoder, value, &mut out)?;
        }
        Ok(out)
    }
}

fn check_encoder(field: Field, encoder: &Encoder) -> Result<(), ModelError> {
    if encoder.accepts() != field.kind() {
        return Err(ModelError::SchemaMismatch(format!(
            "column '{}' is {} but its encoder takes {} values",
            field.name(),
            field.kind(),
            encoder.accepts()
        )));
    }

    match encoder {
        Encoder::StandardScaler { mean, scale } => {
            if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                return Err(ModelError::SchemaMismatch(format!(
                    "column '{}' has an unusable scaler (mean {mean}, scale {scale})",
                    field.name()
                )));
            }
        }
        Encoder::OneHot { categories, .. } | Encoder::Ordinal { categories } => {
            check_categories(field, categories)?;
        }
        Encoder::Passthrough => {}
    }
    Ok(())
}

/// Category list must be exactly the field's domain, in any order.
fn check_categories(field: Field, categories: &[String]) -> Result<(), ModelError> {
    let domain = field.labels().unwrap_or(&[]);
    let mut seen = HashSet::new();
    for category in categories {
        if !domain.contains(&category.as_str()) {
            return Err(ModelError::SchemaMismatch(format!(
                "column '{}' lists unknown category '{category}'",
                field.name()
            )));
        }
        if !seen.insert(category.as_str()) {
            return Err(ModelError::SchemaMismatch(format!(
                "column '{}' lists category '{category}' twice",
                field.name()
            )));
        }
    }
    if let Some(missing) = domain.iter().find(|l| !seen.contains(*l)) {
        return Err(ModelError::SchemaMismatch(format!(
            "column '{}' is missing category '{missing}'",
            field.name()
        )));
    }
    Ok(())
}

fn output_names(field: Field, encoder: &Encoder) -> Vec<String> {
    match encoder {
        Encoder::OneHot { categories, .. } => {
            let skip = usize::from(encoder.drops_first());
            categories
                .iter()
                .skip(skip)
                .map(|c| format!("{}_{c}", field.name()))
                .collect()
        }
        _ => vec![field.name().to_string()],
    }
}

fn encode_into(
    field: Field,
    encoder: &Encoder,
    value: &FieldValue,
    out: &mut Vec<f64>,
) -> Result<(), ModelError> {
    match (encoder, value) {
        (Encoder::Passthrough, FieldValue::Number(x)) => out.push(*x),
        (Encoder::StandardScaler { mean, scale }, FieldValue::Number(x)) => {
            out.push((x - mean) / scale)
        }
        (Encoder::OneHot { categories, .. }, FieldValue::Label(label)) => {
            let hot = position(field, categories, label)?;
            let skip = usize::from(encoder.drops_first());
            out.extend((skip..categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
        }
        (Encoder::Ordinal { categories }, FieldValue::Label(label)) => {
            out.push(position(field, categories, label)? as f64);
        }
        _ => {
            return Err(ModelError::ValueKind {
                column: field.name(),
                expected: encoder.accepts(),
            })
        }
    }
    Ok(())
}

fn position(field: Field, categories: &[String], label: &str) -> Result<usize, ModelError> {
    categories
        .iter()
        .position(|c| c == label)
        .ok_or_else(|| ModelError::UnknownCategory {
            column: field.name(),
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn order(names: &[&str]) -> ColumnOrder {
        ColumnOrder::from_names(names).unwrap()
    }

    fn step(column: &str, encoder: Encoder) -> ColumnEncoding {
        ColumnEncoding {
            column: column.to_string(),
            encoder,
        }
    }

    fn strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn one_hot_drop_binary_names_and_values() {
        let order = order(&["BMI", "Sex", "GenHealth"]);
        let t = ColumnTransformer::new(
            &order,
            vec![
                step("BMI", Encoder::StandardScaler { mean: 28.0, scale: 4.0 }),
                step(
                    "Sex",
                    Encoder::OneHot {
                        categories: strings(&["Female", "Male"]),
                        drop_binary: true,
                    },
                ),
                step(
                    "GenHealth",
                    Encoder::OneHot {
                        categories: strings(&["Poor", "Fair", "Good", "Very good", "Excellent"]),
                        drop_binary: true,
                    },
                ),
            ],
        )
        .unwrap();
        assert_eq!(
            t.feature_names_out(),
            &strings(&[
                "BMI",
                "Sex_Male",
                "GenHealth_Poor",
                "GenHealth_Fair",
                "GenHealth_Good",
                "GenHealth_Very good",
                "GenHealth_Excellent",
            ])[..]
        );
        let x = t
            .transform(&[
                FieldValue::Number(32.0),
                FieldValue::Label("Male"),
                FieldValue::Label("Good"),
            ])
            .unwrap();
        assert_eq!(x, vec![1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn ordinal_uses_listed_order() {
        let order = order(&["GenHealth"]);
        let t = ColumnTransformer::new(
            &order,
            vec![step(
                "GenHealth",
                Encoder::Ordinal {
                    categories: strings(&["Excellent", "Very good", "Good", "Fair", "Poor"]),
                },
            )],
        )
        .unwrap();
        assert_eq!(t.transform(&[FieldValue::Label("Fair")]).unwrap(), vec![3.0]);
    }

    #[test]
    fn steps_must_follow_column_order() {
        let order = order(&["BMI", "SleepTime"]);
        let err = ColumnTransformer::new(
            &order,
            vec![
                step("SleepTime", Encoder::Passthrough),
                step("BMI", Encoder::Passthrough),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
    }

    #[test]
    fn encoder_kind_must_match_field_kind() {
        let order = order(&["Sex"]);
        let err = ColumnTransformer::new(&order, vec![step("Sex", Encoder::Passthrough)]).unwrap_err();
        assert!(err.to_string().contains("categorical"));
    }

    #[test]
    fn categories_must_cover_domain() {
        let order = order(&["Sex"]);
        let err = ColumnTransformer::new(
            &order,
            vec![step(
                "Sex",
                Encoder::Ordinal {
                    categories: strings(&["Male"]),
                },
            )],
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing category 'Female'"));
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let t = ColumnTransformer::uniform(&order(&["BMI"]), CategoricalEncoding::Ordinal);
        let err = t.transform(&[FieldValue::Label("Yes")]).unwrap_err();
        assert!(matches!(err, ModelError::ValueKind { column: "BMI", .. }));
    }

    #[test]
    fn uniform_one_hot_width_over_canonical_columns() {
        let t = ColumnTransformer::uniform(
            &ColumnOrder::canonical(),
            CategoricalEncoding::OneHot { drop_binary: true },
        );
        assert_eq!(t.width(), 41);
        let full = ColumnTransformer::uniform(
            &ColumnOrder::canonical(),
            CategoricalEncoding::OneHot { drop_binary: false },
        );
        assert_eq!(full.width(), 50);
        let ordinal = ColumnTransformer::uniform(&ColumnOrder::canonical(), CategoricalEncoding::Ordinal);
        assert_eq!(ordinal.width(), 17);
    }

    #[test]
    fn encodings_round_trip_through_new() {
        let order = ColumnOrder::canonical();
        let t = ColumnTransformer::uniform(&order, CategoricalEncoding::Ordinal);
        let rebuilt = ColumnTransformer::new(&order, t.encodings()).unwrap();
        assert_eq!(rebuilt.feature_names_out(), t.feature_names_out());
    }
}
