//! Text and JSON rendering for the terminal

use cardio_model::{FeatureImportanceEntry, HeartModel};
use cardio_risk::{AssessmentReport, ImportancePanel};
use cardio_schema::{CollectError, Control, FormControl, FormSpec};
use serde::Serialize;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 40;

/// Horizontal bar chart, one row per entry, bars scaled to the largest weight.
pub fn bar_chart(entries: &[FeatureImportanceEntry], width: usize) -> Vec<String> {
    let name_width = entries.iter().map(|e| e.feature.chars().count()).max().unwrap_or(0);
    let max = entries.iter().map(|e| e.weight).fold(0.0_f64, f64::max);
    entries
        .iter()
        .map(|e| {
            let len = if max > 0.0 {
                ((e.weight / max) * width as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:<name_width$}  {:<width$}  {:.3}",
                e.feature,
                "█".repeat(len),
                e.weight
            )
        })
        .collect()
}

fn render_panel(out: &mut String, panel: &ImportancePanel) {
    match &panel.warning {
        Some(warning) => {
            let _ = writeln!(out, "warning: {warning}");
        }
        None => {
            let _ = writeln!(out, "Top {} feature importances:", panel.entries.len());
            for line in bar_chart(&panel.entries, BAR_WIDTH) {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
}

pub fn report_text(report: &AssessmentReport) -> String {
    let a = &report.assessment;
    let mut out = String::new();
    let _ = writeln!(out, "{}", a.label().message());
    let _ = writeln!(
        out,
        "Confidence Score: {:.2} ({:.0}%)",
        a.confidence(),
        a.confidence_percent()
    );
    let _ = writeln!(out, "Threshold: {}", a.threshold);
    if let Some(panel) = &report.importances {
        out.push('\n');
        render_panel(&mut out, panel);
    }
    out
}

pub fn blocked_text(err: &CollectError) -> String {
    let mut out = String::from("Submission blocked:\n");
    match err {
        CollectError::Invalid(errors) => {
            for e in errors {
                let _ = writeln!(out, "  - {e}");
            }
        }
        other => {
            let _ = writeln!(out, "  - {other}");
        }
    }
    out
}

/// Short description of a control's accepted input
pub fn control_hint(control: &Control) -> String {
    match control {
        Control::Number { min, max, step, .. } => match max {
            Some(max) => format!("number {min}..={max}, step {step}"),
            None => format!("number >= {min}, step {step}"),
        },
        Control::Select { options } | Control::Radio { options } => options.join(" | "),
        Control::Checkbox => "yes / no".to_string(),
        Control::Slider { min, max, step, .. } => format!("{min}..={max}, step {step}"),
    }
}

/// Default answer for a control, as a raw submission value
pub fn control_default(control: &Control) -> Option<String> {
    match control {
        Control::Number { default, .. } | Control::Slider { default, .. } => {
            Some(default.to_string())
        }
        Control::Select { options } | Control::Radio { options } => {
            options.first().map(|o| o.to_string())
        }
        Control::Checkbox => Some("No".to_string()),
    }
}

fn control_line(out: &mut String, c: &FormControl) {
    let _ = writeln!(
        out,
        "  {:<18} {:<16} {}",
        c.label,
        c.key,
        control_hint(&c.control)
    );
}

pub fn form_text(spec: &FormSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", spec.title);
    for (section, controls) in spec.sections() {
        let _ = writeln!(out, "\n{}", section.title());
        for c in controls {
            control_line(&mut out, c);
        }
    }
    out.push('\n');
    control_line(&mut out, &spec.threshold);
    out
}

#[derive(Debug, Serialize)]
pub struct ModelSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub version: String,
    pub model_type: String,
    pub estimator: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub created_at: &'a str,
    pub columns: Vec<&'static str>,
    pub features: &'a [String],
    pub importances_available: bool,
}

impl<'a> ModelSummary<'a> {
    pub fn of(model: &'a HeartModel) -> Self {
        let meta = model.metadata();
        Self {
            id: &meta.id,
            name: &meta.name,
            version: meta.version.to_string(),
            model_type: meta.model_type.to_string(),
            estimator: model.estimator_kind(),
            description: meta.description.as_deref(),
            created_at: &meta.created_at,
            columns: model.column_order().names(),
            features: model.feature_names(),
            importances_available: model.feature_importances().is_ok(),
        }
    }
}

pub fn model_text(summary: &ModelSummary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) v{}", summary.name, summary.id, summary.version);
    let _ = writeln!(out, "type: {} [{}]", summary.model_type, summary.estimator);
    if let Some(d) = summary.description {
        let _ = writeln!(out, "description: {d}");
    }
    let _ = writeln!(out, "created: {}", summary.created_at);
    let _ = writeln!(
        out,
        "feature importances: {}",
        if summary.importances_available {
            "available"
        } else {
            "not available"
        }
    );
    let _ = writeln!(out, "columns ({}): {}", summary.columns.len(), summary.columns.join(", "));
    let _ = writeln!(out, "encoded features ({}):", summary.features.len());
    for (i, f) in summary.features.iter().enumerate() {
        let _ = writeln!(out, "  {i:>3}  {f}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_risk::{RiskAssessment, RiskThreshold};
    use pretty_assertions::assert_eq;

    fn entry(feature: &str, weight: f64) -> FeatureImportanceEntry {
        FeatureImportanceEntry {
            feature: feature.into(),
            weight,
        }
    }

    #[test]
    fn bars_scale_to_largest_weight() {
        let lines = bar_chart(&[entry("Stroke_Yes", 0.5), entry("BMI", 0.25)], 8);
        assert_eq!(
            lines,
            vec![
                "Stroke_Yes  ████████  0.500".to_string(),
                "BMI         ████      0.250".to_string(),
            ]
        );
    }

    #[test]
    fn report_shows_label_and_warning() {
        let report = AssessmentReport {
            model: "m".into(),
            assessment: RiskAssessment::decide(0.73, RiskThreshold::default()),
            importances: Some(ImportancePanel {
                entries: vec![],
                warning: Some("Feature importance not available: nope".into()),
            }),
        };
        let text = report_text(&report);
        assert!(text.starts_with("At Risk of Heart Disease!\n"));
        assert!(text.contains("Confidence Score: 0.73 (73%)"));
        assert!(text.contains("warning: Feature importance not available"));
    }

    #[test]
    fn defaults_follow_controls() {
        assert_eq!(control_default(&Control::Checkbox).as_deref(), Some("No"));
        let select = Control::Select {
            options: vec!["Female", "Male"],
        };
        assert_eq!(control_default(&select).as_deref(), Some("Female"));
        assert_eq!(control_hint(&select), "Female | Male");
    }

    #[test]
    fn form_text_lists_every_section() {
        let text = form_text(&cardio_schema::form_spec());
        assert!(text.starts_with("Heart Disease Risk Predictor\n"));
        for title in ["Health Metrics", "Lifestyle & Conditions", "Demographics"] {
            assert!(text.contains(title));
        }
        assert!(text.contains("Risk threshold"));
    }
}
