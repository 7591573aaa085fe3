//! Resolved run configuration

use cardio_risk::{RiskThreshold, ThresholdError};
use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "models/heart_logistic.json";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("invalid threshold: {0}")]
    Threshold(#[from] ThresholdError),
    #[error("top-N must be at least 1")]
    ZeroTopN,
}

/// Everything a command needs, resolved from flags and environment once
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: PathBuf,
    pub schema: Option<PathBuf>,
    pub threshold: RiskThreshold,
    pub top_n: usize,
    pub verbosity: u8,
}

impl Settings {
    pub fn new(
        model: PathBuf,
        schema: Option<PathBuf>,
        threshold: Option<f64>,
        top_n: usize,
        verbosity: u8,
    ) -> Result<Self, SettingsError> {
        let threshold = match threshold {
            Some(t) => RiskThreshold::new(t)?,
            None => RiskThreshold::default(),
        };
        if top_n == 0 {
            return Err(SettingsError::ZeroTopN);
        }
        Ok(Self {
            model,
            schema,
            threshold,
            top_n,
            verbosity,
        })
    }

    /// Default log filter for the `-v` count
    pub fn log_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the stderr logger; `RUST_LOG` overrides the `-v` level.
    pub fn init_logging(&self) {
        let _ = env_logger::Builder::new()
            .filter_level(self.log_filter())
            .parse_default_env()
            .format_timestamp(None)
            .try_init();
    }
}
