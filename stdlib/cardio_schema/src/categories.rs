//! Enumerated domains of the categorical record fields.
//!
//! Each domain is a closed enum whose canonical representation is its
//! human-readable label; integer codes only exist inside a model's encoder.

use thiserror::Error;

/// A label that is not part of an enumerated domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{label}' is not a valid {domain}")]
pub struct LabelError {
    pub domain: &'static str,
    pub label: String,
}

/// Closed set of labelled options.
pub trait Category: Copy + Eq + Sized + 'static {
    /// Domain name used in diagnostics
    const DOMAIN: &'static str;

    /// Every option, in display order
    fn all() -> &'static [Self];

    /// Canonical label
    fn label(self) -> &'static str;

    /// Extra accepted spellings
    fn aliases() -> &'static [(&'static str, Self)] {
        &[]
    }

    /// Case-insensitive lookup by label or alias.
    fn from_label(raw: &str) -> Result<Self, LabelError> {
        let wanted = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .or_else(|| {
                Self::aliases()
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
                    .map(|(_, c)| *c)
            })
            .ok_or_else(|| LabelError {
                domain: Self::DOMAIN,
                label: raw.to_string(),
            })
    }
}

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident, $domain:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];
        }

        impl $crate::categories::Category for $name {
            const DOMAIN: &'static str = $domain;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn aliases() -> &'static [(&'static str, Self)] {
                $name::ALIASES
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::categories::Category::label(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::categories::LabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::categories::Category>::from_label(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::categories::Category::label(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use label_enum;

label_enum! {
    /// Binary yes/no answer
    YesNo, "yes/no answer" {
        No => "No",
        Yes => "Yes",
    }
}

impl YesNo {
    const ALIASES: &'static [(&'static str, YesNo)] = &[];

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl From<bool> for YesNo {
    fn from(checked: bool) -> Self {
        if checked {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

label_enum! {
    Sex, "sex" {
        Female => "Female",
        Male => "Male",
    }
}

impl Sex {
    const ALIASES: &'static [(&'static str, Sex)] = &[];
}

label_enum! {
    /// Thirteen ordered age bands
    AgeCategory, "age category" {
        From18To24 => "18-24",
        From25To29 => "25-29",
        From30To34 => "30-34",
        From35To39 => "35-39",
        From40To44 => "40-44",
        From45To49 => "45-49",
        From50To54 => "50-54",
        From55To59 => "55-59",
        From60To64 => "60-64",
        From65To69 => "65-69",
        From70To74 => "70-74",
        From75To79 => "75-79",
        EightyOrOlder => "80 or older",
    }
}

impl AgeCategory {
    const ALIASES: &'static [(&'static str, AgeCategory)] = &[
        ("80+", AgeCategory::EightyOrOlder),
        ("80", AgeCategory::EightyOrOlder),
    ];
}

label_enum! {
    Race, "race" {
        White => "White",
        Black => "Black",
        Asian => "Asian",
        AmericanIndianAlaskanNative => "American Indian/Alaskan Native",
        Hispanic => "Hispanic",
        Other => "Other",
    }
}

impl Race {
    const ALIASES: &'static [(&'static str, Race)] = &[];
}

label_enum! {
    /// Diabetes status including borderline and pregnancy-related variants
    Diabetic, "diabetes status" {
        No => "No",
        NoBorderline => "No, borderline diabetes",
        Yes => "Yes",
        YesDuringPregnancy => "Yes (during pregnancy)",
    }
}

impl Diabetic {
    const ALIASES: &'static [(&'static str, Diabetic)] = &[
        ("borderline", Diabetic::NoBorderline),
        ("pregnancy", Diabetic::YesDuringPregnancy),
    ];
}

label_enum! {
    /// Self-reported general health, Poor to Excellent
    GenHealth, "general health rating" {
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
        VeryGood => "Very good",
        Excellent => "Excellent",
    }
}

impl GenHealth {
    const ALIASES: &'static [(&'static str, GenHealth)] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_case_insensitively() {
        for race in Race::ALL {
            assert_eq!(Race::from_label(&race.label().to_uppercase()), Ok(*race));
        }
        assert_eq!("very GOOD".parse::<GenHealth>(), Ok(GenHealth::VeryGood));
    }

    #[test]
    fn age_category_has_thirteen_ordered_bands() {
        assert_eq!(AgeCategory::ALL.len(), 13);
        assert_eq!(AgeCategory::ALL[0].label(), "18-24");
        assert_eq!(AgeCategory::ALL[12].label(), "80 or older");
        assert_eq!("80+".parse::<AgeCategory>(), Ok(AgeCategory::EightyOrOlder));
    }

    #[test]
    fn domains_have_expected_sizes() {
        assert_eq!(Race::LABELS.len(), 6);
        assert_eq!(Diabetic::LABELS.len(), 4);
        assert_eq!(GenHealth::LABELS.len(), 5);
        assert_eq!(YesNo::LABELS, &["No", "Yes"]);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Maybe".parse::<YesNo>().unwrap_err();
        assert_eq!(err.domain, "yes/no answer");
        assert_eq!(err.to_string(), "'Maybe' is not a valid yes/no answer");
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Diabetic::NoBorderline).unwrap();
        assert_eq!(json, "\"No, borderline diabetes\"");
        let back: Diabetic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Diabetic::NoBorderline);
        assert!(serde_json::from_str::<Sex>("\"Other\"").is_err());
    }
}
