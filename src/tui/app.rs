//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{FsReportStore, PdfEncoder};
use crate::application::PredictionService;

use super::ui::{
    form::{render_form, FormState},
    home::{render_home, HomeState},
    render_disclaimer,
    result::{render_result, ResultState},
    select::{render_select, SelectState},
};

/// Prediction service wired to the PDF encoder and filesystem store.
pub type Service = PredictionService<PdfEncoder, FsReportStore>;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Select,
    Form,
    Result,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    service: Service,
    home_state: HomeState,
    select_state: SelectState,
    form_state: Option<FormState>,
    result_state: Option<ResultState>,
}

impl App {
    /// Create the application around a configured service.
    ///
    /// `model_dir` is only shown to the user when no model could be loaded.
    pub fn new(service: Service, model_dir: impl std::fmt::Display) -> Self {
        let home_state = HomeState {
            loaded: service
                .registry()
                .available()
                .into_iter()
                .map(|d| {
                    let fp = service.registry().fingerprint(d).unwrap_or_default();
                    (d, fp.to_string())
                })
                .collect(),
            model_dir: model_dir.to_string(),
        };
        Self {
            screen: Screen::Home,
            should_quit: false,
            service,
            home_state,
            select_state: SelectState::default(),
            form_state: None,
            result_state: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(f.area());

        let content_area = chunks[0];
        match self.screen {
            Screen::Home => render_home(f, content_area, &self.home_state),
            Screen::Select => render_select(f, content_area, &self.select_state),
            Screen::Form => {
                if let Some(form) = &self.form_state {
                    render_form(f, content_area, form);
                }
            }
            Screen::Result => {
                if let Some(result) = &self.result_state {
                    render_result(f, content_area, result);
                }
            }
        }

        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Select => self.handle_select_key(key),
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => self.open_select(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_select_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Home,
            KeyCode::Up => self.select_state.prev(),
            KeyCode::Down | KeyCode::Tab => self.select_state.next(),
            KeyCode::Enter => {
                if let Some(disease) = self.select_state.current() {
                    self.form_state = Some(FormState::new(disease));
                    self.screen = Screen::Form;
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let Some(form) = self.form_state.as_mut() else {
            self.screen = Screen::Select;
            return;
        };
        match key {
            KeyCode::Esc => {
                self.form_state = None;
                self.screen = Screen::Select;
            }
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.step(-1),
            KeyCode::Right => form.step(1),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.reset_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                // Same disease, fresh defaults.
                if let Some(state) = &self.result_state {
                    self.form_state = Some(FormState::new(state.result.disease));
                    self.screen = Screen::Form;
                }
            }
            KeyCode::Esc => self.screen = Screen::Select,
            KeyCode::Char('h') | KeyCode::Char('H') => self.screen = Screen::Home,
            _ => {}
        }
    }

    fn open_select(&mut self) {
        self.select_state = match self.service.available_diseases() {
            Ok(diseases) => SelectState {
                diseases,
                ..SelectState::default()
            },
            Err(e) => {
                tracing::warn!("Prediction unavailable: {}", e);
                SelectState {
                    error_message: Some(e.to_string()),
                    ..SelectState::default()
                }
            }
        };
        self.screen = Screen::Select;
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form_state.as_mut() else {
            return;
        };
        if !form.commit_input() {
            return;
        }

        let record = match form.to_record() {
            Ok(record) => record,
            Err(e) => {
                form.error_message = Some(e.to_string());
                return;
            }
        };

        match self.service.run(form.disease(), &record) {
            Ok(outcome) => {
                self.result_state = Some(ResultState {
                    result: outcome.result,
                    report: outcome.report.map_err(|e| e.to_string()),
                });
                self.screen = Screen::Result;
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                form.error_message = Some(e.to_string());
            }
        }
    }
}
