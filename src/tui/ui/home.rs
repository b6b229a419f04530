//! Home view: introduction and model status.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Disease;
use crate::tui::styles::MedicalTheme;

use super::{render_footer, render_header};

/// Short fingerprint prefix shown next to each loaded model.
const FINGERPRINT_CHARS: usize = 12;

/// What the home screen shows about the registry.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Loaded diseases with their model fingerprints.
    pub loaded: Vec<(Disease, String)>,
    pub model_dir: String,
}

pub fn render_home(f: &mut Frame, area: Rect, state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Srini Health", "Disease Risk Prediction");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .margin(1)
        .split(chunks[1]);

    render_intro(f, columns[0]);
    render_model_status(f, columns[1], state);

    render_footer(
        f,
        chunks[2],
        &[("Enter", "Start Prediction"), ("Q", "Quit")],
        None,
    );
}

fn render_intro(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Welcome", MedicalTheme::subtitle())),
        Line::from(""),
        Line::from(Span::styled(
            "Estimate the risk of a disease from a few clinical measurements.",
            MedicalTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled("1. Pick a disease", MedicalTheme::text_secondary())),
        Line::from(Span::styled(
            "2. Fill in the form (defaults are pre-set)",
            MedicalTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            "3. Read the risk level and recommendation",
            MedicalTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            "4. A PDF report is saved after every prediction",
            MedicalTheme::text_secondary(),
        )),
    ];

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .title(Span::styled(" About ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_model_status(f: &mut Frame, area: Rect, state: &HomeState) {
    let mut lines: Vec<Line> = Disease::ALL
        .iter()
        .map(|disease| {
            let fingerprint = state
                .loaded
                .iter()
                .find(|(d, _)| d == disease)
                .map(|(_, fp)| fp.as_str());
            let mut spans = match fingerprint {
                Some(_) => vec![Span::styled(" ● ", MedicalTheme::success())],
                None => vec![Span::styled(" ○ ", MedicalTheme::text_muted())],
            };
            spans.push(Span::styled(format!("{:<13}", disease.name()), MedicalTheme::text()));
            if let Some(fp) = fingerprint {
                let short: String = fp.chars().take(FINGERPRINT_CHARS).collect();
                spans.push(Span::styled(format!("sha256:{short}"), MedicalTheme::text_muted()));
            }
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    let summary = if state.loaded.is_empty() {
        Span::styled(
            format!("No models found in {}", state.model_dir),
            MedicalTheme::danger(),
        )
    } else {
        Span::styled(
            format!("{} of {} models loaded", state.loaded.len(), Disease::ALL.len()),
            MedicalTheme::text_secondary(),
        )
    };
    lines.push(Line::from(summary));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Supported Diseases ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}
