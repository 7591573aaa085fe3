//! The validated patient record.

use crate::categories::{AgeCategory, Category, Diabetic, GenHealth, Race, Sex, YesNo};
use crate::columns::ColumnOrder;
use crate::field::{Field, FieldValue};
use crate::traits::{Validatable, ValidationError};
use serde::{Deserialize, Serialize};

/// One submission's input.
///
/// Only obtainable through [`PatientRecordBuilder::build`] (or deserialization,
/// which goes through the builder), so every value is present and inside its
/// field's domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientRecordBuilder", rename_all = "PascalCase")]
pub struct PatientRecord {
    #[serde(rename = "BMI")]
    bmi: f64,
    smoking: YesNo,
    alcohol_drinking: YesNo,
    stroke: YesNo,
    physical_health: f64,
    mental_health: f64,
    diff_walking: YesNo,
    sex: Sex,
    age_category: AgeCategory,
    race: Race,
    diabetic: Diabetic,
    physical_activity: YesNo,
    gen_health: GenHealth,
    sleep_time: f64,
    asthma: YesNo,
    kidney_disease: YesNo,
    skin_cancer: YesNo,
}

impl PatientRecord {
    pub fn builder() -> PatientRecordBuilder {
        PatientRecordBuilder::default()
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }
    pub fn physical_health(&self) -> f64 {
        self.physical_health
    }
    pub fn mental_health(&self) -> f64 {
        self.mental_health
    }
    pub fn sleep_time(&self) -> f64 {
        self.sleep_time
    }
    pub fn sex(&self) -> Sex {
        self.sex
    }
    pub fn age_category(&self) -> AgeCategory {
        self.age_category
    }
    pub fn race(&self) -> Race {
        self.race
    }
    pub fn diabetic(&self) -> Diabetic {
        self.diabetic
    }
    pub fn gen_health(&self) -> GenHealth {
        self.gen_health
    }

    /// Value of any field.
    pub fn value(&self, field: Field) -> FieldValue {
        let yes_no = |v: YesNo| FieldValue::Label(v.label());
        match field {
            Field::Bmi => FieldValue::Number(self.bmi),
            Field::Smoking => yes_no(self.smoking),
            Field::AlcoholDrinking => yes_no(self.alcohol_drinking),
            Field::Stroke => yes_no(self.stroke),
            Field::PhysicalHealth => FieldValue::Number(self.physical_health),
            Field::MentalHealth => FieldValue::Number(self.mental_health),
            Field::DiffWalking => yes_no(self.diff_walking),
            Field::Sex => FieldValue::Label(self.sex.label()),
            Field::AgeCategory => FieldValue::Label(self.age_category.label()),
            Field::Race => FieldValue::Label(self.race.label()),
            Field::Diabetic => FieldValue::Label(self.diabetic.label()),
            Field::PhysicalActivity => yes_no(self.physical_activity),
            Field::GenHealth => FieldValue::Label(self.gen_health.label()),
            Field::SleepTime => FieldValue::Number(self.sleep_time),
            Field::Asthma => yes_no(self.asthma),
            Field::KidneyDisease => yes_no(self.kidney_disease),
            Field::SkinCancer => yes_no(self.skin_cancer),
        }
    }

    /// Yes/no answer of a binary field, `None` for other fields.
    pub fn answer(&self, field: Field) -> Option<YesNo> {
        match field {
            Field::Smoking => Some(self.smoking),
            Field::AlcoholDrinking => Some(self.alcohol_drinking),
            Field::Stroke => Some(self.stroke),
            Field::DiffWalking => Some(self.diff_walking),
            Field::PhysicalActivity => Some(self.physical_activity),
            Field::Asthma => Some(self.asthma),
            Field::KidneyDisease => Some(self.kidney_disease),
            Field::SkinCancer => Some(self.skin_cancer),
            _ => None,
        }
    }

    /// Values laid out in a model's column order.
    pub fn values_in(&self, order: &ColumnOrder) -> Vec<FieldValue> {
        order.fields().iter().map(|f| self.value(*f)).collect()
    }
}

impl Validatable for PatientRecord {
    fn validate(&self) -> Result<(), ValidationError> {
        for field in [
            Field::Bmi,
            Field::PhysicalHealth,
            Field::MentalHealth,
            Field::SleepTime,
        ] {
            if let FieldValue::Number(x) = self.value(field) {
                check_range(field, x)?;
            }
        }
        Ok(())
    }
}

fn check_range(field: Field, value: f64) -> Result<(), ValidationError> {
    let Some(range) = field.range() else {
        return Ok(());
    };
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.name(),
        });
    }
    if !range.contains(value) {
        return Err(ValidationError::OutOfRange {
            field: field.name(),
            min: range.min,
            max: range.max,
            actual: value,
        });
    }
    Ok(())
}

/// Accumulates field values; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct PatientRecordBuilder {
    #[serde(rename = "BMI")]
    bmi: Option<f64>,
    smoking: Option<YesNo>,
    alcohol_drinking: Option<YesNo>,
    stroke: Option<YesNo>,
    physical_health: Option<f64>,
    mental_health: Option<f64>,
    diff_walking: Option<YesNo>,
    sex: Option<Sex>,
    age_category: Option<AgeCategory>,
    race: Option<Race>,
    diabetic: Option<Diabetic>,
    physical_activity: Option<YesNo>,
    gen_health: Option<GenHealth>,
    sleep_time: Option<f64>,
    asthma: Option<YesNo>,
    kidney_disease: Option<YesNo>,
    skin_cancer: Option<YesNo>,
}

impl PatientRecordBuilder {
    pub fn bmi(mut self, v: f64) -> Self {
        self.bmi = Some(v);
        self
    }
    pub fn physical_health(mut self, days: f64) -> Self {
        self.physical_health = Some(days);
        self
    }
    pub fn mental_health(mut self, days: f64) -> Self {
        self.mental_health = Some(days);
        self
    }
    pub fn sleep_time(mut self, hours: f64) -> Self {
        self.sleep_time = Some(hours);
        self
    }
    pub fn sex(mut self, v: Sex) -> Self {
        self.sex = Some(v);
        self
    }
    pub fn age_category(mut self, v: AgeCategory) -> Self {
        self.age_category = Some(v);
        self
    }
    pub fn race(mut self, v: Race) -> Self {
        self.race = Some(v);
        self
    }
    pub fn diabetic(mut self, v: Diabetic) -> Self {
        self.diabetic = Some(v);
        self
    }
    pub fn gen_health(mut self, v: GenHealth) -> Self {
        self.gen_health = Some(v);
        self
    }

    /// Set one of the eight yes/no fields. Other fields are left untouched
    /// and reported back as `false`.
    pub fn set_answer(&mut self, field: Field, answer: YesNo) -> bool {
        let slot = match field {
            Field::Smoking => &mut self.smoking,
            Field::AlcoholDrinking => &mut self.alcohol_drinking,
            Field::Stroke => &mut self.stroke,
            Field::DiffWalking => &mut self.diff_walking,
            Field::PhysicalActivity => &mut self.physical_activity,
            Field::Asthma => &mut self.asthma,
            Field::KidneyDisease => &mut self.kidney_disease,
            Field::SkinCancer => &mut self.skin_cancer,
            _ => return false,
        };
        *slot = Some(answer);
        true
    }

    pub fn answer(mut self, field: Field, answer: YesNo) -> Self {
        self.set_answer(field, answer);
        self
    }

    /// Answer every yes/no field at once.
    pub fn all_answers(mut self, answer: YesNo) -> Self {
        for field in Field::ALL.iter().filter(|f| f.is_yes_no()) {
            self.set_answer(*field, answer);
        }
        self
    }

    /// Set a numeric field. Categorical fields are reported back as `false`.
    pub fn set_number(&mut self, field: Field, value: f64) -> bool {
        let slot = match field {
            Field::Bmi => &mut self.bmi,
            Field::PhysicalHealth => &mut self.physical_health,
            Field::MentalHealth => &mut self.mental_health,
            Field::SleepTime => &mut self.sleep_time,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub(crate) fn set_sex(&mut self, v: Sex) {
        self.sex = Some(v);
    }
    pub(crate) fn set_age_category(&mut self, v: AgeCategory) {
        self.age_category = Some(v);
    }
    pub(crate) fn set_race(&mut self, v: Race) {
        self.race = Some(v);
    }
    pub(crate) fn set_diabetic(&mut self, v: Diabetic) {
        self.diabetic = Some(v);
    }
    pub(crate) fn set_gen_health(&mut self, v: GenHealth) {
        self.gen_health = Some(v);
    }

    /// Whether a value has been supplied for `field`.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Bmi => self.bmi.is_some(),
            Field::Smoking => self.smoking.is_some(),
            Field::AlcoholDrinking => self.alcohol_drinking.is_some(),
            Field::Stroke => self.stroke.is_some(),
            Field::PhysicalHealth => self.physical_health.is_some(),
            Field::MentalHealth => self.mental_health.is_some(),
            Field::DiffWalking => self.diff_walking.is_some(),
            Field::Sex => self.sex.is_some(),
            Field::AgeCategory => self.age_category.is_some(),
            Field::Race => self.race.is_some(),
            Field::Diabetic => self.diabetic.is_some(),
            Field::PhysicalActivity => self.physical_activity.is_some(),
            Field::GenHealth => self.gen_health.is_some(),
            Field::SleepTime => self.sleep_time.is_some(),
            Field::Asthma => self.asthma.is_some(),
            Field::KidneyDisease => self.kidney_disease.is_some(),
            Field::SkinCancer => self.skin_cancer.is_some(),
        }
    }

    /// Every missing or out-of-range field, in column order.
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut out = Vec::new();
        for field in Field::ALL {
            if !self.has(field) {
                out.push(ValidationError::MissingField {
                    field: field.name(),
                });
            }
        }
        let numbers = [
            (Field::Bmi, self.bmi),
            (Field::PhysicalHealth, self.physical_health),
            (Field::MentalHealth, self.mental_health),
            (Field::SleepTime, self.sleep_time),
        ];
        for (field, value) in numbers {
            if let Some(x) = value {
                if let Err(e) = check_range(field, x) {
                    out.push(e);
                }
            }
        }
        out
    }

    pub fn build(self) -> Result<PatientRecord, ValidationError> {
        if let Some(first) = self.problems().into_iter().next() {
            return Err(first);
        }
        let missing = |field: Field| ValidationError::MissingField {
            field: field.name(),
        };
        Ok(PatientRecord {
            bmi: self.bmi.ok_or_else(|| missing(Field::Bmi))?,
            smoking: self.smoking.ok_or_else(|| missing(Field::Smoking))?,
            alcohol_drinking: self
                .alcohol_drinking
                .ok_or_else(|| missing(Field::AlcoholDrinking))?,
            stroke: self.stroke.ok_or_else(|| missing(Field::Stroke))?,
            physical_health: self
                .physical_health
                .ok_or_else(|| missing(Field::PhysicalHealth))?,
            mental_health: self
                .mental_health
                .ok_or_else(|| missing(Field::MentalHealth))?,
            diff_walking: self.diff_walking.ok_or_else(|| missing(Field::DiffWalking))?,
            sex: self.sex.ok_or_else(|| missing(Field::Sex))?,
            age_category: self.age_category.ok_or_else(|| missing(Field::AgeCategory))?,
            race: self.race.ok_or_else(|| missing(Field::Race))?,
            diabetic: self.diabetic.ok_or_else(|| missing(Field::Diabetic))?,
            physical_activity: self
                .physical_activity
                .ok_or_else(|| missing(Field::PhysicalActivity))?,
            gen_health: self.gen_health.ok_or_else(|| missing(Field::GenHealth))?,
            sleep_time: self.sleep_time.ok_or_else(|| missing(Field::SleepTime))?,
            asthma: self.asthma.ok_or_else(|| missing(Field::Asthma))?,
            kidney_disease: self
                .kidney_disease
                .ok_or_else(|| missing(Field::KidneyDisease))?,
            skin_cancer: self.skin_cancer.ok_or_else(|| missing(Field::SkinCancer))?,
        })
    }
}

impl TryFrom<PatientRecordBuilder> for PatientRecord {
    type Error = ValidationError;

    fn try_from(builder: PatientRecordBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
