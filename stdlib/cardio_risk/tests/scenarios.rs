use cardio_model::{
    CategoricalEncoding, ColumnTransformer, Estimator, HeartModel, ModelError, ModelMetadata,
    ModelType, ModelVersion,
};
use cardio_risk::{
    assess_submission, evaluate, importance_panel, AssessOptions, RiskLabel, RiskThreshold,
    SubmissionError,
};
use cardio_schema::{collect, ColumnOrder, PatientRecord, Submission};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Estimator returning a fixed probability and counting its calls
#[derive(Debug)]
struct Fixed {
    p: f64,
    calls: Arc<AtomicUsize>,
}

impl Estimator for Fixed {
    fn kind(&self) -> &str {
        "fixed"
    }

    fn n_features(&self) -> usize {
        17
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        assert_eq!(features.len(), 17);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.p)
    }
}

fn fixed_model(p: f64) -> (HeartModel, Arc<AtomicUsize>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let calls = Arc::new(AtomicUsize::new(0));
    let order = ColumnOrder::canonical();
    let transformer = ColumnTransformer::uniform(&order, CategoricalEncoding::Ordinal);
    let metadata = ModelMetadata::new(
        "fixed",
        "fixed probability",
        ModelVersion::new(0, 1, 0),
        ModelType::Custom("fixed".into()),
    );
    let estimator = Fixed {
        p,
        calls: Arc::clone(&calls),
    };
    let model = HeartModel::new(metadata, order, transformer, Box::new(estimator)).unwrap();
    (model, calls)
}

fn scenario_submission() -> Submission {
    let mut s = Submission::new()
        .with("BMI", "22.0")
        .with("PhysicalHealth", "0")
        .with("MentalHealth", "0")
        .with("SleepTime", "8")
        .with("Sex", "Female")
        .with("AgeCategory", "25-29")
        .with("Race", "White")
        .with("Diabetic", "No")
        .with("GenHealth", "Good");
    for field in [
        "Smoking",
        "AlcoholDrinking",
        "Stroke",
        "DiffWalking",
        "PhysicalActivity",
        "Asthma",
        "KidneyDisease",
        "SkinCancer",
    ] {
        s.insert(field, "No");
    }
    s
}

fn scenario_record() -> PatientRecord {
    collect(&scenario_submission()).unwrap()
}

fn threshold(v: f64) -> RiskThreshold {
    RiskThreshold::new(v).unwrap()
}

#[test]
fn low_probability_is_not_at_risk() {
    let (model, calls) = fixed_model(0.10);
    let a = evaluate(&scenario_record(), threshold(0.5), &model).unwrap();
    assert_eq!(a.label(), RiskLabel::NotAtRisk);
    assert_eq!(format!("{:.0}", a.confidence_percent()), "10");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn high_probability_is_at_risk() {
    let (model, _) = fixed_model(0.73);
    let a = evaluate(&scenario_record(), threshold(0.5), &model).unwrap();
    assert!(a.is_risk);
    assert_eq!(format!("{:.0}", a.confidence_percent()), "73");
}

#[test]
fn raised_threshold_flips_to_not_at_risk() {
    let (model, _) = fixed_model(0.73);
    let a = evaluate(&scenario_record(), threshold(0.80), &model).unwrap();
    assert!(!a.is_risk);
    assert_eq!(a.confidence(), 0.73);
}

#[test]
fn probability_equal_to_threshold_is_at_risk() {
    let (model, _) = fixed_model(0.5);
    assert!(evaluate(&scenario_record(), RiskThreshold::default(), &model)
        .unwrap()
        .is_risk);
}

#[test]
fn invalid_probability_surfaces_as_error() {
    let (model, _) = fixed_model(f64::NAN);
    assert!(matches!(
        evaluate(&scenario_record(), threshold(0.5), &model),
        Err(ModelError::InvalidProbability(_))
    ));
}

#[test]
fn missing_importances_degrade_to_warning() {
    let (model, _) = fixed_model(0.73);
    let options = AssessOptions {
        importances: true,
        top_n: 10,
    };
    let report =
        assess_submission(&scenario_submission(), threshold(0.5), &model, options).unwrap();
    assert!(report.assessment.is_risk);
    let panel = report.importances.unwrap();
    assert!(panel.entries.is_empty());
    assert!(!panel.is_available());
    assert!(panel.warning.unwrap().contains("fixed models do not expose"));
}

#[test]
fn blocked_submission_never_reaches_the_model() {
    let (model, calls) = fixed_model(0.73);
    let mut submission = scenario_submission();
    submission.insert("BMI", "4");
    submission.insert("Race", "Martian");
    let err = assess_submission(&submission, threshold(0.5), &model, AssessOptions::default())
        .unwrap_err();
    assert!(err.is_blocked_input());
    match err {
        SubmissionError::Blocked(collect_err) => assert_eq!(collect_err.errors().len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn forest_panel_is_truncated_to_top_n() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/heart_forest.json");
    let model = HeartModel::load(&path).unwrap();
    let panel = importance_panel(&model, 5);
    assert!(panel.is_available());
    assert_eq!(panel.entries.len(), 5);
    assert!(panel
        .entries
        .windows(2)
        .all(|w| w[0].weight >= w[1].weight));
}

#[test]
fn report_serializes_without_absent_panel() {
    let (model, _) = fixed_model(0.10);
    let report = assess_submission(
        &scenario_submission(),
        threshold(0.5),
        &model,
        AssessOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["model"], "fixed");
    assert_eq!(json["assessment"]["is_risk"], false);
    assert!(json.get("importances").is_none());
}
