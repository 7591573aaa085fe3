//! Process-wide loaded model.
//!
//! The model is installed once at start-up and read concurrently afterwards.
//! There is no way to replace it.

use crate::backend::ModelError;
use crate::pipeline::HeartModel;
use log::info;
use once_cell::sync::OnceCell;
use std::path::Path;

static LOADED: OnceCell<HeartModel> = OnceCell::new();

/// Install `model` as the process-wide model.
pub fn install(model: HeartModel) -> Result<&'static HeartModel, ModelError> {
    LOADED.set(model).map_err(|_| ModelError::AlreadyLoaded)?;
    let model = loaded()?;
    info!("installed model '{}'", model.metadata().id);
    Ok(model)
}

/// The installed model
pub fn loaded() -> Result<&'static HeartModel, ModelError> {
    LOADED.get().ok_or(ModelError::NotLoaded)
}

/// Load from `path` (checked against `schema` when given) and install.
pub fn load_and_install(
    path: &Path,
    schema: Option<&Path>,
) -> Result<&'static HeartModel, ModelError> {
    let model = match schema {
        Some(schema) => HeartModel::load_with_schema(path, schema)?,
        None => HeartModel::load(path)?,
    };
    install(model)
}
