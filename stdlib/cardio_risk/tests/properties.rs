use cardio_model::{HeartModel, ModelArtifact};
use cardio_risk::{evaluate, RiskAssessment, RiskThreshold};
use cardio_schema::{AgeCategory, Diabetic, GenHealth, PatientRecord, Race, Sex, YesNo};
use proptest::prelude::*;
use std::path::Path;
use std::sync::OnceLock;

fn logistic() -> &'static HeartModel {
    static MODEL: OnceLock<HeartModel> = OnceLock::new();
    MODEL.get_or_init(|| {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/heart_logistic.json");
        HeartModel::from_artifact(ModelArtifact::read(&path).unwrap()).unwrap()
    })
}

prop_compose! {
    fn records()(
        bmi in 10.0f64..60.0,
        physical in 0.0f64..=30.0,
        mental in 0.0f64..=30.0,
        sleep in 0.0f64..=24.0,
        sex in prop::sample::select(Sex::ALL),
        age in prop::sample::select(AgeCategory::ALL),
        race in prop::sample::select(Race::ALL),
        diabetic in prop::sample::select(Diabetic::ALL),
        gen in prop::sample::select(GenHealth::ALL),
        yes in any::<bool>(),
    ) -> PatientRecord {
        PatientRecord::builder()
            .bmi(bmi)
            .physical_health(physical)
            .mental_health(mental)
            .sleep_time(sleep)
            .sex(sex)
            .age_category(age)
            .race(race)
            .diabetic(diabetic)
            .gen_health(gen)
            .all_answers(YesNo::from(yes))
            .build()
            .unwrap()
    }
}

proptest! {
    #[test]
    fn decision_is_inclusive_comparison(p in 0.0f64..=1.0, t in 0.0f64..=1.0) {
        let a = RiskAssessment::decide(p, RiskThreshold::new(t).unwrap());
        prop_assert_eq!(a.is_risk, p >= t);
        prop_assert_eq!(a.confidence(), p);
    }

    #[test]
    fn raising_threshold_never_adds_risk(p in 0.0f64..=1.0, lo in 0.0f64..=1.0, hi in 0.0f64..=1.0) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let at_lo = RiskAssessment::decide(p, RiskThreshold::new(lo).unwrap());
        let at_hi = RiskAssessment::decide(p, RiskThreshold::new(hi).unwrap());
        prop_assert!(!at_hi.is_risk || at_lo.is_risk);
    }

    #[test]
    fn evaluation_is_idempotent(record in records(), t in 0.0f64..=1.0) {
        let t = RiskThreshold::new(t).unwrap();
        let first = evaluate(&record, t, logistic()).unwrap();
        let second = evaluate(&record, t, logistic()).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!((0.0..=1.0).contains(&first.probability));
    }
}

