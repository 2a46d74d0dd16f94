//! Layered runtime settings.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file,
//! then `GATUS_TUI_*` environment variables. Command-line flags are applied
//! on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::format::parse_duration;

/// Environment variable prefix, e.g. `GATUS_TUI_URL`.
pub const ENV_PREFIX: &str = "GATUS_TUI";

pub const DEFAULT_URL: &str = "http://localhost:8080";
pub const DEFAULT_REFRESH: &str = "30s";
pub const DEFAULT_TIMEOUT: &str = "10s";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Base URL of the Gatus server.
    pub url: String,
    /// Interval between fetches, e.g. "30s".
    pub refresh: String,
    /// Per-request timeout, e.g. "10s".
    pub timeout: String,
    /// Preferences file; the platform config dir when unset.
    #[serde(default)]
    pub preferences: Option<PathBuf>,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, the default config file
    /// is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(File::from(path).format(FileFormat::Toml).required(true)),
            None => Self::default_path()
                .map(|p| File::from(p.as_path()).format(FileFormat::Toml).required(false)),
        };
        Self::build(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// `<config dir>/gatus-tui/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gatus-tui").join("config.toml"))
    }

    fn build<F>(file: Option<F>, env: Environment) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("refresh", DEFAULT_REFRESH)?
            .set_default("timeout", DEFAULT_TIMEOUT)?;
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings: Settings = builder
            .add_source(env)
            .build()
            .context("Failed to load settings")?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.refresh_interval()?;
        self.request_timeout()?;
        Ok(())
    }

    /// Parsed refresh interval. Must be non-zero.
    pub fn refresh_interval(&self) -> Result<Duration> {
        positive_duration("refresh", &self.refresh)
    }

    /// Parsed request timeout. Must be non-zero.
    pub fn request_timeout(&self) -> Result<Duration> {
        positive_duration("timeout", &self.timeout)
    }
}

fn positive_duration(name: &str, value: &str) -> Result<Duration> {
    let duration = parse_duration(value).with_context(|| format!("Invalid {}: {}", name, value))?;
    // A zero refresh would spin the poller, a zero timeout fails every request
    anyhow::ensure!(
        !duration.is_zero(),
        "Invalid {}: {} (must be greater than zero)",
        name,
        value
    );
    Ok(duration)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            refresh: DEFAULT_REFRESH.to_string(),
            timeout: DEFAULT_TIMEOUT.to_string(),
            preferences: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::build(None::<File<config::FileSourceFile, FileFormat>>, no_env())
            .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(settings.request_timeout().unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = \"https://status.example.com\"\nrefresh = \"1m\"\n").unwrap();

        let file = File::from(path.as_path()).format(FileFormat::Toml);
        let settings = Settings::build(Some(file), no_env()).unwrap();
        assert_eq!(settings.url, "https://status.example.com");
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(60));
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = \"https://from-file\"\n").unwrap();

        let file = File::from(path.as_path()).format(FileFormat::Toml);
        let settings = Settings::build(
            Some(file),
            env(&[("GATUS_TUI_URL", "https://from-env"), ("GATUS_TUI_TIMEOUT", "500ms")]),
        )
        .unwrap();
        assert_eq!(settings.url, "https://from-env");
        assert_eq!(settings.request_timeout().unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let result = Settings::build(
            None::<File<config::FileSourceFile, FileFormat>>,
            env(&[("GATUS_TUI_REFRESH", "soon")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_durations_rejected() {
        let refresh = Settings::build(
            None::<File<config::FileSourceFile, FileFormat>>,
            env(&[("GATUS_TUI_REFRESH", "0s")]),
        );
        assert!(refresh.unwrap_err().to_string().contains("refresh"));

        let timeout = Settings::build(
            None::<File<config::FileSourceFile, FileFormat>>,
            env(&[("GATUS_TUI_TIMEOUT", "0ms")]),
        );
        assert!(timeout.unwrap_err().to_string().contains("timeout"));

        // Command-line overrides go through the same accessors
        let settings = Settings {
            refresh: "0m".to_string(),
            ..Settings::default()
        };
        assert!(settings.refresh_interval().is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
