//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home with model status
//! - Disease selection
//! - Schema-driven patient form
//! - Result with risk gauge and report location

mod app;
mod styles;
mod ui;

pub use app::{App, Screen, Service};
pub use styles::MedicalTheme;
