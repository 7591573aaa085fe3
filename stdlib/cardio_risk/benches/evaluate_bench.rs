use cardio_model::HeartModel;
use cardio_risk::{evaluate, RiskThreshold};
use cardio_schema::{collect, Submission};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn submission() -> Submission {
    let mut s = Submission::new()
        .with("BMI", "31.4")
        .with("PhysicalHealth", "Average")
        .with("MentalHealth", "Great")
        .with("SleepTime", "Not enough")
        .with("Sex", "Male")
        .with("AgeCategory", "65-69")
        .with("Race", "White")
        .with("Diabetic", "Yes")
        .with("GenHealth", "Fair");
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

fn bench_evaluate(c: &mut Criterion) {
    let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let record = collect(&submission()).expect("valid submission");
    let threshold = RiskThreshold::default();

    for name in ["heart_logistic.json", "heart_forest.json"] {
        let model = HeartModel::load(&models.join(name)).expect("demo model loads");
        c.bench_function(&format!("evaluate {name}"), |b| {
            b.iter(|| evaluate(black_box(&record), threshold, &model))
        });
    }

    c.bench_function("collect submission", |b| {
        let s = submission();
        b.iter(|| collect(black_box(&s)))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
