//! Input form description and submission collection.
//!
//! `form_spec` describes one control per record field plus the threshold
//! slider. `collect` turns a raw submission (field name to typed-in text)
//! into a [`PatientRecord`]; any missing, unknown or out-of-domain value
//! blocks the whole submission and every problem is reported at once.

use crate::buckets::{HealthBucket, SleepBucket};
use crate::categories::{AgeCategory, Category, Diabetic, GenHealth, LabelError, Race, Sex, YesNo};
use crate::field::Field;
use crate::record::{PatientRecord, PatientRecordBuilder};
use crate::traits::ValidationError;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

pub const THRESHOLD_MIN: f64 = 0.0;
pub const THRESHOLD_MAX: f64 = 1.0;
pub const THRESHOLD_STEP: f64 = 0.01;
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    #[serde(rename = "Health Metrics")]
    HealthMetrics,
    #[serde(rename = "Lifestyle & Conditions")]
    LifestyleAndConditions,
    #[serde(rename = "Demographics")]
    Demographics,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::HealthMetrics => "Health Metrics",
            Section::LifestyleAndConditions => "Lifestyle & Conditions",
            Section::Demographics => "Demographics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Number {
        min: f64,
        max: Option<f64>,
        step: f64,
        default: f64,
    },
    Select {
        options: Vec<&'static str>,
    },
    Radio {
        options: Vec<&'static str>,
    },
    Checkbox,
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControl {
    /// Submission key
    pub key: &'static str,
    pub label: &'static str,
    pub section: Option<Section>,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub title: &'static str,
    pub controls: Vec<FormControl>,
    pub threshold: FormControl,
}

impl FormSpec {
    pub fn control(&self, field: Field) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.key == field.name())
    }

    pub fn sections(&self) -> Vec<(Section, Vec<&FormControl>)> {
        let mut out: Vec<(Section, Vec<&FormControl>)> = Vec::new();
        for control in &self.controls {
            let Some(section) = control.section else {
                continue;
            };
            match out.iter_mut().find(|(s, _)| *s == section) {
                Some((_, items)) => items.push(control),
                None => out.push((section, vec![control])),
            }
        }
        out
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Bmi => "BMI",
        Field::Smoking => "Smoking",
        Field::AlcoholDrinking => "Alcohol Drinking",
        Field::Stroke => "Stroke",
        Field::PhysicalHealth => "Physical Health",
        Field::MentalHealth => "Mental Health",
        Field::DiffWalking => "Difficulty Walking",
        Field::Sex => "Sex",
        Field::AgeCategory => "Age Category",
        Field::Race => "Race",
        Field::Diabetic => "Diabetic",
        Field::PhysicalActivity => "Physical Activity",
        Field::GenHealth => "General Health",
        Field::SleepTime => "Sleep Time",
        Field::Asthma => "Asthma",
        Field::KidneyDisease => "Kidney Disease",
        Field::SkinCancer => "Skin Cancer",
    }
}

fn control_for(field: Field) -> FormControl {
    let (section, control) = match field {
        Field::Bmi => (
            Section::HealthMetrics,
            Control::Number {
                min: 10.0,
                max: None,
                step: 0.1,
                default: 10.0,
            },
        ),
        Field::PhysicalHealth | Field::MentalHealth => (
            Section::HealthMetrics,
            Control::Select {
                options: HealthBucket::ALL.iter().map(|b| b.description()).collect(),
            },
        ),
        Field::SleepTime => (
            Section::HealthMetrics,
            Control::Select {
                options: SleepBucket::ALL.iter().map(|b| b.description()).collect(),
            },
        ),
        Field::Sex => (
            Section::Demographics,
            Control::Radio {
                options: Sex::LABELS.to_vec(),
            },
        ),
        Field::AgeCategory => (
            Section::Demographics,
            Control::Select {
                options: AgeCategory::LABELS.to_vec(),
            },
        ),
        Field::Race => (
            Section::Demographics,
            Control::Select {
                options: Race::LABELS.to_vec(),
            },
        ),
        Field::GenHealth => (
            Section::Demographics,
            Control::Select {
                options: GenHealth::LABELS.to_vec(),
            },
        ),
        Field::Diabetic => (
            Section::LifestyleAndConditions,
            Control::Select {
                options: Diabetic::LABELS.to_vec(),
            },
        ),
        _ => (Section::LifestyleAndConditions, Control::Checkbox),
    };
    FormControl {
        key: field.name(),
        label: field_label(field),
        section: Some(section),
        control,
    }
}

/// The input form: health metrics, lifestyle checkboxes, demographics and
/// the decision threshold slider.
pub fn form_spec() -> FormSpec {
    let order = [
        Field::Bmi,
        Field::PhysicalHealth,
        Field::MentalHealth,
        Field::SleepTime,
        Field::Smoking,
        Field::AlcoholDrinking,
        Field::Stroke,
        Field::DiffWalking,
        Field::PhysicalActivity,
        Field::Asthma,
        Field::KidneyDisease,
        Field::SkinCancer,
        Field::Diabetic,
        Field::Sex,
        Field::AgeCategory,
        Field::Race,
        Field::GenHealth,
    ];
    FormSpec {
        title: "Heart Disease Risk Predictor",
        controls: order.into_iter().map(control_for).collect(),
        threshold: FormControl {
            key: "threshold",
            label: "Risk threshold",
            section: None,
            control: Control::Slider {
                min: THRESHOLD_MIN,
                max: THRESHOLD_MAX,
                step: THRESHOLD_STEP,
                default: DEFAULT_THRESHOLD,
            },
        },
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("submission must be a JSON object of field names to values")]
    NotAnObject,
    #[error("value of '{0}' must be a string, number or boolean")]
    NotScalar(String),
    #[error("expected FIELD=VALUE, got '{0}'")]
    MalformedAssignment(String),
    #[error("submission blocked: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

impl CollectError {
    /// Field-level problems; empty for malformed submissions.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            CollectError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw form values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    entries: BTreeMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Known field names are stored in their canonical spelling, so a later
    /// insert under any spelling replaces the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(canonical_key(&key.into()), value.into());
    }

    /// Parse a `FIELD=VALUE` assignment; the value may contain `=`.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<(), CollectError> {
        let (key, value) = assignment
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| CollectError::MalformedAssignment(assignment.to_string()))?;
        self.insert(key.trim(), value.trim());
        Ok(())
    }

    /// Build from a JSON object. Nulls are skipped, so they surface as
    /// missing fields. Two spellings of one field in the same object are
    /// rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self, CollectError> {
        let object = value.as_object().ok_or(CollectError::NotAnObject)?;
        let mut out = Self::new();
        let mut spelled: BTreeMap<String, &str> = BTreeMap::new();
        let mut duplicates = Vec::new();
        for (key, v) in object {
            let text = match v {
                JsonValue::Null => continue,
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                _ => return Err(CollectError::NotScalar(key.clone())),
            };
            let canonical = canonical_key(key);
            if let Some(first) = spelled.get(&canonical) {
                duplicates.push(ValidationError::DuplicateField {
                    name: canonical.clone(),
                    first: first.to_string(),
                    second: key.clone(),
                });
                continue;
            }
            spelled.insert(canonical.clone(), key);
            out.entries.insert(canonical, text);
        }
        if !duplicates.is_empty() {
            return Err(CollectError::Invalid(duplicates));
        }
        Ok(out)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&canonical_key(key)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay another submission; its values win.
    pub fn merge(&mut self, other: Submission) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical_key(key: &str) -> String {
    match Field::lookup(key) {
        Some(field) => field.name().to_string(),
        None => key.trim().to_string(),
    }
}

fn label<C: Category>(field: Field, raw: &str) -> Result<C, ValidationError> {
    C::from_label(raw).map_err(|LabelError { label, .. }| ValidationError::UnknownLabel {
        field: field.name(),
        label,
    })
}

fn checkbox(field: Field, raw: &str) -> Result<YesNo, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "checked" | "y" => Ok(YesNo::Yes),
        "false" | "0" | "off" | "unchecked" | "n" => Ok(YesNo::No),
        _ => label(field, raw),
    }
}

fn number_or_bucket<B: Category>(
    field: Field,
    raw: &str,
    value_of: fn(B) -> f64,
) -> Result<f64, ValidationError> {
    if let Ok(x) = raw.trim().parse::<f64>() {
        return Ok(x);
    }
    label::<B>(field, raw).map(value_of)
}

/// Parse one raw value into the builder. Range checks are left to the
/// builder so that they are reported the same way for every entry path.
pub fn apply_field(
    builder: &mut PatientRecordBuilder,
    field: Field,
    raw: &str,
) -> Result<(), ValidationError> {
    match field {
        Field::Bmi => {
            let x = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NotANumber {
                    field: field.name(),
                    raw: raw.to_string(),
                })?;
            builder.set_number(field, x);
        }
        Field::PhysicalHealth | Field::MentalHealth => {
            let days = number_or_bucket(field, raw, HealthBucket::days)?;
            builder.set_number(field, days);
        }
        Field::SleepTime => {
            let hours = number_or_bucket(field, raw, SleepBucket::hours)?;
            builder.set_number(field, hours);
        }
        Field::Sex => builder.set_sex(label(field, raw)?),
        Field::AgeCategory => builder.set_age_category(label(field, raw)?),
        Field::Race => builder.set_race(label(field, raw)?),
        Field::Diabetic => builder.set_diabetic(label(field, raw)?),
        Field::GenHealth => builder.set_gen_health(label(field, raw)?),
        _ => {
            builder.set_answer(field, checkbox(field, raw)?);
        }
    }
    Ok(())
}

/// Collect a submission into a validated record.
pub fn collect(submission: &Submission) -> Result<PatientRecord, CollectError> {
    let mut builder = PatientRecord::builder();
    let mut errors = Vec::new();
    let mut rejected = HashSet::new();

    for (key, raw) in submission.iter() {
        let Some(field) = Field::lookup(key) else {
            errors.push(ValidationError::UnknownField {
                name: key.to_string(),
            });
            continue;
        };
        if let Err(e) = apply_field(&mut builder, field, raw) {
            rejected.insert(field.name());
            errors.push(e);
        }
    }

    // A rejected value also shows up as missing; report it once.
    errors.extend(
        builder
            .problems()
            .into_iter()
            .filter(|p| !p.field().is_some_and(|f| rejected.contains(f))),
    );

    if !errors.is_empty() {
        log::debug!("submission blocked with {} problem(s)", errors.len());
        return Err(CollectError::Invalid(errors));
    }
    builder.build().map_err(|e| CollectError::Invalid(vec![e]))
}
