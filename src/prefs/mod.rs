//! Persisted theme and color mode preferences.
//!
//! Two independent string keys hold the user's choices. Reads fall back to
//! defaults for absent or unrecognized values; writes of unrecognized values
//! are ignored. Nothing here fails outward.
//!
//! The presentation layer is reached only through [`PresentationTarget`],
//! passed explicitly to each call.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::fmt;

use tracing::{debug, warn};

/// Storage key for the visual theme.
pub const THEME_KEY: &str = "gatus-minimal:theme";
/// Storage key for the color mode.
pub const COLOR_MODE_KEY: &str = "gatus-minimal:color-mode";

/// Visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    #[default]
    Gatus,
    Github,
    Tui,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Gatus, ThemeName::Github, ThemeName::Tui];

    /// Parse a stored value; `None` if it is not a known theme.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gatus => "gatus",
            ThemeName::Github => "github",
            ThemeName::Tui => "tui",
        }
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            ThemeName::Gatus => ThemeName::Github,
            ThemeName::Github => ThemeName::Tui,
            ThemeName::Tui => ThemeName::Gatus,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light/dark preference, orthogonal to the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    Light,
    Dark,
    /// Follow the terminal background.
    #[default]
    System,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [ColorMode::Light, ColorMode::Dark, ColorMode::System];

    /// Parse a stored value; `None` if it is not a known mode.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
            ColorMode::System => "system",
        }
    }

    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::System,
            ColorMode::System => ColorMode::Light,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of user choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeConfig {
    pub theme: ThemeName,
    pub color_mode: ColorMode,
}

/// Receives preference changes for display.
pub trait PresentationTarget {
    fn set_theme(&mut self, theme: ThemeName);
    fn set_color_mode(&mut self, mode: ColorMode);
}

/// Validating front end over a [`KeyValueStore`].
#[derive(Debug)]
pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new<S: KeyValueStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// A store that forgets everything on exit.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Current configuration, with defaults for absent or invalid values.
    pub fn get_config(&self) -> ThemeConfig {
        let defaults = ThemeConfig::default();

        let theme = self
            .store
            .get(THEME_KEY)
            .and_then(|v| ThemeName::parse(&v))
            .unwrap_or(defaults.theme);
        let color_mode = self
            .store
            .get(COLOR_MODE_KEY)
            .and_then(|v| ColorMode::parse(&v))
            .unwrap_or(defaults.color_mode);

        ThemeConfig { theme, color_mode }
    }

    /// Persist `value` as the theme and signal it to `target`.
    ///
    /// Unknown values are ignored without writing or signaling. Returns
    /// whether the value was accepted.
    pub fn set_theme(&mut self, value: &str, target: &mut dyn PresentationTarget) -> bool {
        let Some(theme) = ThemeName::parse(value) else {
            debug!(value, "ignoring unknown theme");
            return false;
        };

        self.persist(THEME_KEY, theme.as_str());
        target.set_theme(theme);
        true
    }

    /// Persist `value` as the color mode and signal it to `target`.
    ///
    /// Unknown values are ignored without writing or signaling. Returns
    /// whether the value was accepted.
    pub fn set_color_mode(&mut self, value: &str, target: &mut dyn PresentationTarget) -> bool {
        let Some(mode) = ColorMode::parse(value) else {
            debug!(value, "ignoring unknown color mode");
            return false;
        };

        self.persist(COLOR_MODE_KEY, mode.as_str());
        target.set_color_mode(mode);
        true
    }

    /// Signal the current configuration to `target`. Safe to repeat.
    pub fn apply_config(&self, target: &mut dyn PresentationTarget) {
        let config = self.get_config();
        target.set_theme(config.theme);
        target.set_color_mode(config.color_mode);
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, value, "failed to persist preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrefsError;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PresentationTarget for Recorder {
        fn set_theme(&mut self, theme: ThemeName) {
            self.calls.push(format!("theme={}", theme));
        }

        fn set_color_mode(&mut self, mode: ColorMode) {
            self.calls.push(format!("color-mode={}", mode));
        }
    }

    #[derive(Debug)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PrefsError> {
            Err(PrefsError::NoConfigDir)
        }
    }

    fn store_with(entries: &[(&str, &str)]) -> PreferenceStore {
        PreferenceStore::new(MemoryStore::with_entries(entries.iter().copied()))
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = PreferenceStore::in_memory().get_config();
        assert_eq!(config.theme, ThemeName::Gatus);
        assert_eq!(config.color_mode, ColorMode::System);
    }

    #[test]
    fn test_reads_valid_values() {
        let config = store_with(&[(THEME_KEY, "github"), (COLOR_MODE_KEY, "dark")]).get_config();
        assert_eq!(config.theme, ThemeName::Github);
        assert_eq!(config.color_mode, ColorMode::Dark);
    }

    #[test]
    fn test_invalid_theme_falls_back() {
        let config =
            store_with(&[(THEME_KEY, "not-a-theme"), (COLOR_MODE_KEY, "light")]).get_config();
        assert_eq!(config.theme, ThemeName::Gatus);
        assert_eq!(config.color_mode, ColorMode::Light);
    }

    #[test]
    fn test_invalid_color_mode_falls_back() {
        let config = store_with(&[(THEME_KEY, "tui"), (COLOR_MODE_KEY, "auto")]).get_config();
        assert_eq!(config.theme, ThemeName::Tui);
        assert_eq!(config.color_mode, ColorMode::System);
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let config = store_with(&[(THEME_KEY, "GitHub"), (COLOR_MODE_KEY, "DARK")]).get_config();
        assert_eq!(config, ThemeConfig::default());
    }

    #[test]
    fn test_set_theme_persists_and_signals() {
        let mut prefs = PreferenceStore::in_memory();
        let mut target = Recorder::default();

        assert!(prefs.set_theme("github", &mut target));
        assert_eq!(prefs.get_config().theme, ThemeName::Github);
        assert_eq!(target.calls, ["theme=github"]);
    }

    #[test]
    fn test_set_theme_ignores_invalid() {
        let mut prefs = store_with(&[(THEME_KEY, "tui")]);
        let mut target = Recorder::default();

        assert!(!prefs.set_theme("not-a-theme", &mut target));
        assert_eq!(prefs.store.get(THEME_KEY).as_deref(), Some("tui"));
        assert!(target.calls.is_empty());

        let mut empty = PreferenceStore::in_memory();
        assert!(!empty.set_theme("invalid", &mut target));
        assert!(empty.store.get(THEME_KEY).is_none());
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_set_color_mode_persists_and_signals() {
        let mut prefs = PreferenceStore::in_memory();
        let mut target = Recorder::default();

        assert!(prefs.set_color_mode("dark", &mut target));
        assert_eq!(prefs.store.get(COLOR_MODE_KEY).as_deref(), Some("dark"));
        assert_eq!(target.calls, ["color-mode=dark"]);
    }

    #[test]
    fn test_set_color_mode_ignores_invalid() {
        let mut prefs = PreferenceStore::in_memory();
        let mut target = Recorder::default();

        assert!(!prefs.set_color_mode("auto", &mut target));
        assert!(prefs.store.get(COLOR_MODE_KEY).is_none());
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut prefs = PreferenceStore::in_memory();
        let mut target = Recorder::default();

        prefs.set_theme("tui", &mut target);
        assert_eq!(prefs.get_config().color_mode, ColorMode::System);
        prefs.set_color_mode("light", &mut target);
        assert_eq!(prefs.get_config().theme, ThemeName::Tui);
    }

    #[test]
    fn test_apply_config_is_idempotent() {
        let prefs = store_with(&[(THEME_KEY, "tui"), (COLOR_MODE_KEY, "light")]);
        let mut target = Recorder::default();

        prefs.apply_config(&mut target);
        assert_eq!(target.calls, ["theme=tui", "color-mode=light"]);

        prefs.apply_config(&mut target);
        assert_eq!(target.calls.len(), 4);
        assert_eq!(target.calls[2..], ["theme=tui", "color-mode=light"]);
    }

    #[test]
    fn test_write_failure_still_signals() {
        let mut prefs = PreferenceStore::new(ReadOnlyStore);
        let mut target = Recorder::default();

        assert!(prefs.set_theme("github", &mut target));
        assert_eq!(target.calls, ["theme=github"]);
        // Nothing was stored, so reads still give the default
        assert_eq!(prefs.get_config().theme, ThemeName::Gatus);
    }

    #[test]
    fn test_cycling() {
        assert_eq!(ThemeName::Tui.next(), ThemeName::Gatus);
        assert_eq!(ColorMode::System.next(), ColorMode::Light);
        for theme in ThemeName::ALL {
            assert_eq!(ThemeName::parse(theme.as_str()), Some(theme));
        }
        for mode in ColorMode::ALL {
            assert_eq!(ColorMode::parse(mode.as_str()), Some(mode));
        }
    }
}
