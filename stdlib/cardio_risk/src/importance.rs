//! Feature-importance panel with a soft failure mode

use cardio_model::{FeatureImportanceEntry, HeartModel};
use log::warn;
use serde::Serialize;

pub const DEFAULT_TOP_N: usize = 10;

/// Top-N importances, or the reason they are unavailable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportancePanel {
    pub entries: Vec<FeatureImportanceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ImportancePanel {
    pub fn is_available(&self) -> bool {
        self.warning.is_none()
    }
}

/// Build the panel for `model`. A model without importances yields an empty
/// panel carrying a warning instead of an error.
pub fn importance_panel(model: &HeartModel, top_n: usize) -> ImportancePanel {
    match model.feature_importances() {
        Ok(mut entries) => {
            entries.truncate(top_n);
            ImportancePanel {
                entries,
                warning: None,
            }
        }
        Err(e) => {
            warn!("feature importances unavailable: {e}");
            ImportancePanel {
                entries: Vec::new(),
                warning: Some(format!("Feature importance not available: {e}")),
            }
        }
    }
}
