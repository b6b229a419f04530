//! Prediction result view.

use std::path::PathBuf;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::PredictionResult;
use crate::tui::styles::MedicalTheme;

use super::{render_footer, render_header};

/// A finished prediction and what happened to its report.
#[derive(Debug, Clone)]
pub struct ResultState {
    pub result: PredictionResult,
    /// Saved report location, or the message explaining why it was not saved.
    pub report: Result<PathBuf, String>,
}

pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Prediction Result",
        state.result.disease.name(),
    );

    let block = Block::default()
        .title(Span::styled(
            format!(" {} Risk ", state.result.disease),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Gauge
            Constraint::Length(3), // Risk level + recommendation
            Constraint::Min(0),    // Report
        ])
        .margin(1)
        .split(inner);

    let risk_style = MedicalTheme::risk_level(state.result.risk);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Probability ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .ratio((state.result.probability / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.2}%", state.result.probability));
    f.render_widget(gauge, rows[0]);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Risk Level: ", MedicalTheme::text_secondary()),
            Span::styled(
                state.result.risk.to_string(),
                risk_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Recommendation: ", MedicalTheme::text_secondary()),
            Span::styled(state.result.recommendation, MedicalTheme::text()),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(summary, rows[1]);

    let report_line = match &state.report {
        Ok(path) => Line::from(vec![
            Span::styled("Report saved: ", MedicalTheme::success()),
            Span::styled(path.display().to_string(), MedicalTheme::text()),
        ]),
        Err(message) => Line::from(vec![
            Span::styled("Report not saved: ", MedicalTheme::danger()),
            Span::styled(message.clone(), MedicalTheme::text()),
        ]),
    };
    f.render_widget(
        Paragraph::new(report_line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[2],
    );

    render_footer(
        f,
        chunks[2],
        &[("Enter", "New Prediction"), ("Esc", "Choose Disease"), ("H", "Home")],
        None,
    );
}
