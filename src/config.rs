//! Runtime configuration from `SRINI_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use crate::HealthError;

const DEFAULT_MODEL_DIR: &str = "models";
const DEFAULT_REPORT_DIR: &str = ".";
const DEFAULT_LOG_FILE: &str = "srini-health.log";

/// Where log output goes.
///
/// Writing logs to the terminal corrupts the TUI (alternate screen), so an
/// interactive session logs to a file by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a TTY, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

impl FromStr for LogMode {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(HealthError::Config(format!(
                "SRINI_LOG_MODE must be auto, file or stdout (got '{other}')"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `<disease>_model.json` files.
    pub model_dir: PathBuf,

    /// Directory reports are written to.
    pub report_dir: PathBuf,

    pub log_mode: LogMode,

    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `HealthError::Config` for an unrecognised `SRINI_LOG_MODE`.
    pub fn from_env() -> Result<Self, HealthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or empty values fall back
    /// to defaults.
    ///
    /// # Errors
    /// Returns `HealthError::Config` for an unrecognised `SRINI_LOG_MODE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HealthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            model_dir: get("SRINI_MODEL_DIR").map_or(defaults.model_dir, PathBuf::from),
            report_dir: get("SRINI_REPORT_DIR").map_or(defaults.report_dir, PathBuf::from),
            log_mode: get("SRINI_LOG_MODE")
                .map(|v| v.parse::<LogMode>())
                .transpose()?
                .unwrap_or_default(),
            log_file: get("SRINI_LOG_FILE").map_or(defaults.log_file, PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.report_dir, PathBuf::from("."));
        assert_eq!(config.log_file, PathBuf::from("srini-health.log"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SRINI_MODEL_DIR", "/srv/models"),
            ("SRINI_REPORT_DIR", "/tmp/reports"),
            ("SRINI_LOG_MODE", "Stdout"),
            ("SRINI_LOG_FILE", "/var/log/srini.log"),
        ]))
        .unwrap();

        assert_eq!(config.model_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/var/log/srini.log"));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("SRINI_MODEL_DIR", "  ")])).unwrap();
        assert_eq!(config.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_bad_log_mode() {
        let err = AppConfig::from_lookup(lookup(&[("SRINI_LOG_MODE", "syslog")])).unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
