//! Field-by-field form entry for the interactive command.
//!
//! The session walks the form controls in order, then the threshold slider.
//! An empty answer takes the control's default. `:back` returns to the
//! previous control and `:quit` abandons the form.

use crate::render::{control_default, control_hint};
use cardio_risk::RiskThreshold;
use cardio_schema::{
    apply_field, Field, FormControl, FormSpec, PatientRecord, PatientRecordBuilder,
    ValidationError,
};

/// Result of feeding one line to the session
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn say(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: false,
        }
    }
}

pub struct FormSession {
    controls: Vec<(Field, FormControl)>,
    threshold_control: FormControl,
    builder: PatientRecordBuilder,
    threshold: RiskThreshold,
    /// Index into `controls`; `controls.len()` is the threshold step, one past
    /// that is done
    position: usize,
}

impl FormSession {
    pub fn new(spec: &FormSpec, threshold: RiskThreshold) -> Self {
        let controls = spec
            .controls
            .iter()
            .filter_map(|c| Field::from_name(c.key).map(|f| (f, c.clone())))
            .collect();
        Self {
            controls,
            threshold_control: spec.threshold.clone(),
            builder: PatientRecordBuilder::default(),
            threshold,
            position: 0,
        }
    }

    fn current(&self) -> Option<&FormControl> {
        match self.controls.get(self.position) {
            Some((_, c)) => Some(c),
            None if self.position == self.controls.len() => Some(&self.threshold_control),
            None => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.position > self.controls.len()
    }

    pub fn prompt(&self) -> String {
        match self.current() {
            Some(c) if self.position == self.controls.len() => {
                format!("{} [{}] (default {}) > ", c.label, control_hint(&c.control), self.threshold)
            }
            Some(c) => format!("{} [{}] > ", c.label, control_hint(&c.control)),
            None => "> ".to_string(),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let answer = line.trim();
        match answer {
            ":quit" | ":q" => {
                return Reply {
                    lines: vec!["form abandoned".into()],
                    quit: true,
                }
            }
            ":back" => {
                self.position = self.position.saturating_sub(1);
                return Reply::default();
            }
            _ => {}
        }

        if self.position == self.controls.len() {
            return self.answer_threshold(answer);
        }
        let Some((field, control)) = self.controls.get(self.position) else {
            return Reply::default();
        };
        let field = *field;
        let raw = match answer {
            "" => control_default(&control.control).unwrap_or_default(),
            _ => answer.to_string(),
        };
        if let Err(e) = self.set(field, &raw) {
            return Reply::say(format!("  {e}"));
        }
        self.position += 1;
        Reply::default()
    }

    fn set(&mut self, field: Field, raw: &str) -> Result<(), ValidationError> {
        apply_field(&mut self.builder, field, raw)?;
        match self
            .builder
            .problems()
            .into_iter()
            .find(|p| p.field() == Some(field.name()))
        {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }

    fn answer_threshold(&mut self, answer: &str) -> Reply {
        if !answer.is_empty() {
            match answer.parse::<f64>() {
                Ok(raw) => match RiskThreshold::from_slider(raw) {
                    Ok(t) => self.threshold = t,
                    Err(e) => return Reply::say(format!("  {e}")),
                },
                Err(_) => return Reply::say(format!("  threshold must be a number, got '{answer}'")),
            }
        }
        self.position += 1;
        Reply::default()
    }

    /// The collected record and threshold, once every control is answered.
    pub fn finish(self) -> Result<(PatientRecord, RiskThreshold), ValidationError> {
        Ok((self.builder.build()?, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_schema::{form_spec, Sex};

    fn session() -> FormSession {
        FormSession::new(&form_spec(), RiskThreshold::default())
    }

    #[test]
    fn defaults_complete_the_form() {
        let mut s = session();
        while !s.is_complete() {
            assert_eq!(s.handle_line(""), Reply::default());
        }
        let (record, threshold) = s.finish().unwrap();
        assert_eq!(record.bmi(), 10.0);
        assert_eq!(record.physical_health(), 2.0);
        assert_eq!(record.sleep_time(), 3.0);
        assert_eq!(record.sex(), Sex::Female);
        assert_eq!(threshold, RiskThreshold::default());
    }

    #[test]
    fn out_of_range_answer_reprompts() {
        let mut s = session();
        assert!(s.prompt().starts_with("BMI [number >= 10"));
        let reply = s.handle_line("4.5");
        assert_eq!(reply.lines.len(), 1);
        assert!(reply.lines[0].contains("BMI"));
        assert!(s.prompt().starts_with("BMI"));
        assert_eq!(s.handle_line("23.1"), Reply::default());
        assert!(s.prompt().starts_with("Physical Health"));
    }

    #[test]
    fn back_returns_to_previous_control() {
        let mut s = session();
        s.handle_line("30");
        s.handle_line(":back");
        assert!(s.prompt().starts_with("BMI"));
    }

    #[test]
    fn threshold_is_snapped_and_checked() {
        let mut s = session();
        for _ in 0..17 {
            s.handle_line("");
        }
        assert!(s.prompt().starts_with("Risk threshold"));
        assert_eq!(s.handle_line("1.7").lines.len(), 1);
        assert!(s.handle_line("0.804").lines.is_empty());
        let (_, t) = s.finish().unwrap();
        assert_eq!(t.value(), 0.8);
    }

    #[test]
    fn quit_abandons() {
        let mut s = session();
        assert!(s.handle_line(":quit").quit);
    }
}
