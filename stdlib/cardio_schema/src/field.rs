//! Record fields, their kinds and domains.

use crate::categories::{AgeCategory, Diabetic, GenHealth, Race, Sex, YesNo};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numerical,
    Categorical,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Numerical => f.write_str("numerical"),
            FieldKind::Categorical => f.write_str("categorical"),
        }
    }
}

/// Inclusive numeric bounds; `max` is `f64::INFINITY` when unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    Numeric(NumericRange),
    Categorical(&'static [&'static str]),
}

/// Value of a single field, as handed to a model's encoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Label(&'static str),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(x) => write!(f, "{x}"),
            FieldValue::Label(l) => f.write_str(l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Bmi,
    Smoking,
    AlcoholDrinking,
    Stroke,
    PhysicalHealth,
    MentalHealth,
    DiffWalking,
    Sex,
    AgeCategory,
    Race,
    Diabetic,
    PhysicalActivity,
    GenHealth,
    SleepTime,
    Asthma,
    KidneyDisease,
    SkinCancer,
}

lazy_static! {
    static ref BY_LOWERCASE_NAME: HashMap<String, Field> = Field::ALL
        .iter()
        .map(|f| (f.name().to_ascii_lowercase(), *f))
        .collect();
}

impl Field {
    /// All fields, in the column order the bundled models were trained on.
    pub const ALL: [Field; 17] = [
        Field::Bmi,
        Field::Smoking,
        Field::AlcoholDrinking,
        Field::Stroke,
        Field::PhysicalHealth,
        Field::MentalHealth,
        Field::DiffWalking,
        Field::Sex,
        Field::AgeCategory,
        Field::Race,
        Field::Diabetic,
        Field::PhysicalActivity,
        Field::GenHealth,
        Field::SleepTime,
        Field::Asthma,
        Field::KidneyDisease,
        Field::SkinCancer,
    ];

    /// Column name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Bmi => "BMI",
            Field::Smoking => "Smoking",
            Field::AlcoholDrinking => "AlcoholDrinking",
            Field::Stroke => "Stroke",
            Field::PhysicalHealth => "PhysicalHealth",
            Field::MentalHealth => "MentalHealth",
            Field::DiffWalking => "DiffWalking",
            Field::Sex => "Sex",
            Field::AgeCategory => "AgeCategory",
            Field::Race => "Race",
            Field::Diabetic => "Diabetic",
            Field::PhysicalActivity => "PhysicalActivity",
            Field::GenHealth => "GenHealth",
            Field::SleepTime => "SleepTime",
            Field::Asthma => "Asthma",
            Field::KidneyDisease => "KidneyDisease",
            Field::SkinCancer => "SkinCancer",
        }
    }

    /// Exact column-name lookup.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Case-insensitive lookup, used for user-typed form keys.
    pub fn lookup(name: &str) -> Option<Field> {
        BY_LOWERCASE_NAME
            .get(&name.trim().to_ascii_lowercase())
            .copied()
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Bmi | Field::PhysicalHealth | Field::MentalHealth | Field::SleepTime => {
                FieldKind::Numerical
            }
            _ => FieldKind::Categorical,
        }
    }

    pub fn domain(self) -> Domain {
        match self {
            Field::Bmi => Domain::Numeric(NumericRange {
                min: 10.0,
                max: f64::INFINITY,
            }),
            Field::PhysicalHealth | Field::MentalHealth => {
                Domain::Numeric(NumericRange { min: 0.0, max: 30.0 })
            }
            Field::SleepTime => Domain::Numeric(NumericRange { min: 0.0, max: 24.0 }),
            Field::Sex => Domain::Categorical(Sex::LABELS),
            Field::AgeCategory => Domain::Categorical(AgeCategory::LABELS),
            Field::Race => Domain::Categorical(Race::LABELS),
            Field::Diabetic => Domain::Categorical(Diabetic::LABELS),
            Field::GenHealth => Domain::Categorical(GenHealth::LABELS),
            _ => Domain::Categorical(YesNo::LABELS),
        }
    }

    /// Numeric bounds, `None` for categorical fields.
    pub fn range(self) -> Option<NumericRange> {
        match self.domain() {
            Domain::Numeric(r) => Some(r),
            Domain::Categorical(_) => None,
        }
    }

    /// Category labels, `None` for numerical fields.
    pub fn labels(self) -> Option<&'static [&'static str]> {
        match self.domain() {
            Domain::Categorical(labels) => Some(labels),
            Domain::Numeric(_) => None,
        }
    }

    pub fn is_yes_no(self) -> bool {
        matches!(
            self,
            Field::Smoking
                | Field::AlcoholDrinking
                | Field::Stroke
                | Field::DiffWalking
                | Field::PhysicalActivity
                | Field::Asthma
                | Field::KidneyDisease
                | Field::SkinCancer
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
