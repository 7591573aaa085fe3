//! The process-wide handle is global, so its whole lifecycle lives in one test.

use cardio_model::{install, load_and_install, loaded, HeartModel, ModelError};
use std::path::Path;

#[test]
fn install_once_then_read() {
    let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");

    assert!(matches!(loaded(), Err(ModelError::NotLoaded)));

    let installed = load_and_install(&models.join("heart_logistic.json"), None).unwrap();
    assert_eq!(installed.metadata().id, "heart-logistic");
    assert!(std::ptr::eq(installed, loaded().unwrap()));

    let second = HeartModel::load(&models.join("heart_forest.json")).unwrap();
    assert!(matches!(install(second), Err(ModelError::AlreadyLoaded)));
    assert_eq!(loaded().unwrap().metadata().id, "heart-logistic");
}
