//! Patient record schema for heart-disease risk assessment.
//!
//! Holds the typed `PatientRecord`, the enumerated domains of its categorical
//! fields, the qualitative bucket maps used by the input form, and the column
//! order table a trained classifier is checked against.

pub mod buckets;
pub mod categories;
pub mod columns;
pub mod field;
pub mod form;
pub mod record;
pub mod traits;

pub use buckets::{HealthBucket, SleepBucket};
pub use categories::{AgeCategory, Category, Diabetic, GenHealth, LabelError, Race, Sex, YesNo};
pub use columns::{ColumnOrder, SchemaDescriptor, SchemaError};
pub use field::{Domain, Field, FieldKind, FieldValue, NumericRange};
pub use form::{
    apply_field, collect, form_spec, CollectError, Control, FormControl, FormSpec, Section,
    Submission, DEFAULT_THRESHOLD, THRESHOLD_MAX, THRESHOLD_MIN, THRESHOLD_STEP,
};
pub use record::{PatientRecord, PatientRecordBuilder};
pub use traits::{Validatable, ValidationError};
