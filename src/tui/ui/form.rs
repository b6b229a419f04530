//! Patient data input form, generated from a disease schema.

use std::collections::HashMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Disease, DiseaseSchema, FieldKind, FieldSpec, FieldValue, PatientRecord};
use crate::tui::styles::MedicalTheme;
use crate::HealthError;

use super::{render_footer, render_header};

const SLIDER_WIDTH: usize = 20;

/// Form state: one value per schema field plus an optional typed buffer for
/// the selected field.
#[derive(Debug, Clone)]
pub struct FormState {
    pub schema: &'static DiseaseSchema,
    pub values: Vec<FieldValue>,
    pub selected_field: usize,
    /// Digits typed into the selected field, not yet committed.
    pub input: Option<String>,
    pub error_message: Option<String>,
}

impl FormState {
    /// A form for `disease` pre-filled with the schema defaults.
    #[must_use]
    pub fn new(disease: Disease) -> Self {
        let schema = disease.schema();
        Self {
            schema,
            values: schema.fields.iter().map(FieldSpec::default_value).collect(),
            selected_field: 0,
            input: None,
            error_message: None,
        }
    }

    #[must_use]
    pub fn disease(&self) -> Disease {
        self.schema.disease
    }

    fn field(&self) -> &'static FieldSpec {
        &self.schema.fields[self.selected_field]
    }

    pub fn next_field(&mut self) {
        if self.commit_input() {
            self.selected_field = (self.selected_field + 1) % self.values.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.commit_input() {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = self.values.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Move the selected slider, or cycle the selected choice.
    pub fn step(&mut self, steps: i32) {
        self.input = None;
        self.error_message = None;
        let field = self.field();
        let value = &mut self.values[self.selected_field];
        *value = field.step_by(value, steps);
    }

    /// Add a character to the typed buffer.
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.input.get_or_insert_with(String::new).push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(buf) = &mut self.input {
            buf.pop();
            if buf.is_empty() {
                self.input = None;
            }
        }
    }

    /// Put the selected field back to its default.
    pub fn reset_field(&mut self) {
        self.input = None;
        self.error_message = None;
        self.values[self.selected_field] = self.field().default_value();
    }

    /// Apply the typed buffer to the selected field.
    ///
    /// Returns false, keeping the buffer and setting an error, when the text
    /// is not a valid value for the field.
    pub fn commit_input(&mut self) -> bool {
        let Some(text) = self.input.take() else {
            return true;
        };
        match self.field().parse_value(&text) {
            Ok(value) => {
                self.values[self.selected_field] = value;
                self.error_message = None;
                true
            }
            Err(message) => {
                self.error_message = Some(message);
                self.input = Some(text);
                false
            }
        }
    }

    /// Collect the form into a patient record in schema order.
    ///
    /// # Errors
    /// Returns `HealthError::InvalidRecord` if the record does not match the
    /// schema's field set.
    pub fn to_record(&self) -> Result<PatientRecord, HealthError> {
        let raw: HashMap<String, FieldValue> = self
            .schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name.to_string(), *value))
            .collect();
        PatientRecord::collect(self.schema, &raw)
    }
}

/// Render the patient data input form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &format!("{} Risk", state.disease()),
        &format!("{} inputs", state.schema.len()),
    );
    render_fields(f, chunks[1], state);
    render_footer(
        f,
        chunks[2],
        &[
            ("↑↓", "Navigate"),
            ("←→", "Adjust"),
            ("0-9", "Type"),
            ("Del", "Default"),
            ("Enter", "Predict"),
            ("Esc", "Back"),
        ],
        state.error_message.as_deref(),
    );
}

fn render_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let block = Block::default()
        .title(Span::styled(" Patient Details ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = usize::from(inner.height).max(1);
    let offset = state.selected_field.saturating_sub(visible - 1);

    let label_width = state
        .schema
        .fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = state
        .schema
        .fields
        .iter()
        .zip(&state.values)
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, (field, value))| {
            let is_selected = i == state.selected_field;
            let label_style = if is_selected {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text_secondary()
            };

            let mut spans = vec![
                Span::styled(if is_selected { " ▶ " } else { "   " }, label_style),
                Span::styled(format!("{:<label_width$}  ", field.label), label_style),
            ];

            match (&state.input, is_selected) {
                (Some(buf), true) => {
                    spans.push(Span::styled(format!("{buf}▌"), MedicalTheme::text()));
                }
                _ => spans.extend(value_spans(field, value)),
            }
            spans.push(Span::styled(
                format!("  ({})", field.domain_hint()),
                MedicalTheme::text_muted(),
            ));
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn value_spans(field: &FieldSpec, value: &FieldValue) -> Vec<Span<'static>> {
    match field.kind {
        FieldKind::Numeric { min, max, .. } => {
            let bar = slider_bar(min, max, value.as_f64(), SLIDER_WIDTH);
            vec![
                Span::styled(bar, MedicalTheme::border_focused()),
                Span::styled(format!(" {value}"), MedicalTheme::text()),
            ]
        }
        FieldKind::Categorical { choices } => choices
            .iter()
            .map(|code| {
                let style = if FieldValue::Integer(*code) == *value {
                    MedicalTheme::selected()
                } else {
                    MedicalTheme::text_muted()
                };
                Span::styled(format!(" {code} "), style)
            })
            .collect(),
    }
}

/// `[=====-----]` with the filled share matching the value's position.
fn slider_bar(min: f64, max: f64, value: f64, width: usize) -> String {
    let fraction = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
}
