//! Qualitative answers for numeric fields.
//!
//! The form offers coarse buckets instead of raw day or hour counts; each
//! bucket stands for one fixed representative value. These values are a
//! design choice of the form, not estimates, and must not change.

use crate::categories::label_enum;

label_enum! {
    /// Bucket for the number of physically or mentally unwell days in the last 30
    HealthBucket, "health bucket" {
        Great => "Great",
        Average => "Average",
        Poor => "Poor",
    }
}

impl HealthBucket {
    const ALIASES: &'static [(&'static str, HealthBucket)] = &[
        ("Great (0-3 bad days)", HealthBucket::Great),
        ("Average (4-10 bad days)", HealthBucket::Average),
        ("Poor (11-30 bad days)", HealthBucket::Poor),
        ("Great (0–3 bad days)", HealthBucket::Great),
        ("Average (4–10 bad days)", HealthBucket::Average),
        ("Poor (11–30 bad days)", HealthBucket::Poor),
    ];

    /// Representative number of unwell days.
    pub fn days(self) -> f64 {
        match self {
            HealthBucket::Great => 2.0,
            HealthBucket::Average => 7.0,
            HealthBucket::Poor => 20.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HealthBucket::Great => "Great (0-3 bad days)",
            HealthBucket::Average => "Average (4-10 bad days)",
            HealthBucket::Poor => "Poor (11-30 bad days)",
        }
    }
}

label_enum! {
    /// Bucket for average hours of sleep per day
    SleepBucket, "sleep bucket" {
        TooLittle => "Too little",
        NotEnough => "Not enough",
        Healthy => "Healthy",
        TooMuch => "Too much",
    }
}

impl SleepBucket {
    const ALIASES: &'static [(&'static str, SleepBucket)] = &[
        ("Too little (<4 hrs)", SleepBucket::TooLittle),
        ("Not enough (4-6 hrs)", SleepBucket::NotEnough),
        ("Healthy (7-9 hrs)", SleepBucket::Healthy),
        ("Too much (10+ hrs)", SleepBucket::TooMuch),
        ("Not enough (4–6 hrs)", SleepBucket::NotEnough),
        ("Healthy (7–9 hrs)", SleepBucket::Healthy),
    ];

    /// Representative hours of sleep.
    pub fn hours(self) -> f64 {
        match self {
            SleepBucket::TooLittle => 3.0,
            SleepBucket::NotEnough => 5.0,
            SleepBucket::Healthy => 8.0,
            SleepBucket::TooMuch => 10.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SleepBucket::TooLittle => "Too little (<4 hrs)",
            SleepBucket::NotEnough => "Not enough (4-6 hrs)",
            SleepBucket::Healthy => "Healthy (7-9 hrs)",
            SleepBucket::TooMuch => "Too much (10+ hrs)",
        }
    }
}
