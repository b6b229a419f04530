//! Disease selection view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::Disease;
use crate::tui::styles::MedicalTheme;

use super::{render_footer, render_header};

/// Disease list with a cursor. An empty list means prediction is disabled.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    pub diseases: Vec<Disease>,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl SelectState {
    pub fn next(&mut self) {
        if !self.diseases.is_empty() {
            self.selected = (self.selected + 1) % self.diseases.len();
        }
    }

    pub fn prev(&mut self) {
        if self.diseases.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.diseases.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Disease> {
        self.diseases.get(self.selected).copied()
    }
}

pub fn render_select(f: &mut Frame, area: Rect, state: &SelectState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "Select Disease", "Choose a model to run");

    if state.diseases.is_empty() {
        let message = state
            .error_message
            .clone()
            .unwrap_or_else(|| "No models available".to_string());
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("! Prediction unavailable", MedicalTheme::danger())),
            Line::from(""),
            Line::from(Span::styled(message, MedicalTheme::text())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::danger()),
        );
        f.render_widget(p, chunks[1]);
        render_footer(f, chunks[2], &[("Esc", "Back")], None);
        return;
    }

    let items: Vec<ListItem> = state
        .diseases
        .iter()
        .map(|d| {
            ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::raw(d.name()),
                Span::styled(
                    format!("  ({} inputs)", d.schema().len()),
                    MedicalTheme::text_muted(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Available Models ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border_focused()),
        )
        .style(MedicalTheme::text())
        .highlight_style(MedicalTheme::selected())
        .highlight_symbol("▶");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    render_footer(
        f,
        chunks[2],
        &[("↑↓", "Navigate"), ("Enter", "Open Form"), ("Esc", "Back")],
        state.error_message.as_deref(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps() {
        let mut state = SelectState {
            diseases: vec![Disease::Kidney, Disease::Heart],
            ..SelectState::default()
        };
        state.prev();
        assert_eq!(state.current(), Some(Disease::Heart));
        state.next();
        assert_eq!(state.current(), Some(Disease::Kidney));
    }

    #[test]
    fn test_empty_list_has_no_current() {
        let mut state = SelectState::default();
        state.next();
        state.prev();
        assert_eq!(state.current(), None);
    }
}
