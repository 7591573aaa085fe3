//! Library half of the `cardio` command: settings, rendering and the
//! interactive form session.

pub mod render;
pub mod session;
pub mod settings;

pub use session::{FormSession, Reply};
pub use settings::{Settings, SettingsError, DEFAULT_MODEL};
