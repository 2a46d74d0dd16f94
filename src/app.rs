//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::data::{preprocess_endpoints_at, EndpointView, ProcessedEndpoints};
use crate::prefs::PreferenceStore;
use crate::source::{DataSource, StatusSnapshot};
use crate::ui::{Appearance, Theme};

/// Shown in place of data while the last fetch failed.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load endpoint statuses. Please try again later.";

/// How often relative timestamps are recomputed between fetches.
const RECOMPUTE_INTERVAL: Duration = Duration::from_secs(1);

/// The current view/tab in the TUI.
///
/// Endpoint detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One tile per endpoint, colored by status.
    Grid,
    /// Table of all endpoints.
    List,
    /// Table of unhealthy and unknown endpoints only.
    Problems,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Grid => View::List,
            View::List => View::Problems,
            View::Problems => View::Grid,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Grid => View::Problems,
            View::List => View::Grid,
            View::Problems => View::List,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Grid => "Grid",
            View::List => "List",
            View::Problems => "Problems",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    snapshot: Option<StatusSnapshot>,
    pub data: Option<ProcessedEndpoints>,
    pub load_error: Option<String>,
    pub last_fetch: Option<Instant>,
    last_recompute: Option<Instant>,

    // Navigation state (index into the visible list of the current view)
    pub selected_index: usize,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // Preferences and look
    prefs: PreferenceStore,
    appearance: Appearance,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`, with the look taken from `prefs`.
    pub fn new(source: Box<dyn DataSource>, prefs: PreferenceStore) -> Self {
        Self::with_appearance(source, prefs, Appearance::default())
    }

    /// Like [`App::new`], with an explicit starting [`Appearance`].
    pub fn with_appearance(
        source: Box<dyn DataSource>,
        prefs: PreferenceStore,
        mut appearance: Appearance,
    ) -> Self {
        prefs.apply_config(&mut appearance);

        Self {
            running: true,
            current_view: View::Grid,
            show_help: false,
            show_detail_overlay: false,
            source,
            snapshot: None,
            data: None,
            load_error: None,
            last_fetch: None,
            last_recompute: None,
            selected_index: 0,
            filter_text: String::new(),
            filter_active: false,
            prefs,
            appearance,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The active palette.
    pub fn theme(&self) -> &Theme {
        self.appearance.theme()
    }

    /// The active appearance (theme and color mode).
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for new data.
    ///
    /// Returns true if new data was received. When the source reports an
    /// error the transform is skipped and `load_error` is set, which makes
    /// the UI show [`LOAD_FAILED_MESSAGE`] instead of stale data.
    pub fn reload_data(&mut self) -> bool {
        self.reload_data_at(Utc::now())
    }

    /// [`App::reload_data`] with an explicit reference time.
    pub fn reload_data_at(&mut self, now: DateTime<Utc>) -> bool {
        let polled = self.source.poll();

        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return false;
        }

        let Some(snapshot) = polled else {
            return false;
        };

        self.snapshot = Some(snapshot);
        self.load_error = None;
        self.last_fetch = Some(Instant::now());
        self.recompute(now);
        true
    }

    /// Rebuild view models from the last snapshot so relative times stay
    /// current between fetches.
    pub fn tick(&mut self) {
        let due = self.last_recompute.is_none_or(|t| t.elapsed() >= RECOMPUTE_INTERVAL);
        if due {
            self.recompute(Utc::now());
        }
    }

    fn recompute(&mut self, now: DateTime<Utc>) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        self.data = Some(preprocess_endpoints_at(snapshot, now));
        self.last_recompute = Some(Instant::now());
        self.clamp_selection();
    }

    /// Ask the source for fresh data right away.
    pub fn refresh(&mut self) {
        self.source.request_refresh();
        self.reload_data();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Endpoints shown by the current view, after filtering.
    pub fn visible_endpoints(&self) -> Vec<&EndpointView> {
        let Some(ref data) = self.data else {
            return Vec::new();
        };

        let filter = |e: &&EndpointView| e.matches(&self.filter_text);
        match self.current_view {
            View::Grid | View::List => data.endpoints.iter().filter(filter).collect(),
            View::Problems => data.problems().filter(filter).collect(),
        }
    }

    /// The endpoint under the cursor, if any.
    pub fn selected_endpoint(&self) -> Option<&EndpointView> {
        self.visible_endpoints().get(self.selected_index).copied()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_endpoints().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Switch to the next view (cycles through Grid → List → Problems).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_index = 0;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_endpoints().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_endpoints().len().saturating_sub(1);
    }

    /// Open the detail overlay for the selected endpoint.
    pub fn enter_detail(&mut self) {
        if self.selected_endpoint().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to the grid.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.current_view != View::Grid {
            self.set_view(View::Grid);
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch to the next visual theme and remember it.
    pub fn cycle_theme(&mut self) {
        let next = self.appearance.config().theme.next();
        if self.prefs.set_theme(next.as_str(), &mut self.appearance) {
            self.set_status_message(format!("Theme: {}", next));
        }
    }

    /// Switch to the next color mode and remember it.
    pub fn cycle_color_mode(&mut self) {
        let next = self.appearance.config().color_mode.next();
        if self.prefs.set_color_mode(next.as_str(), &mut self.appearance) {
            self.set_status_message(format!("Color mode: {}", next));
        }
    }

    /// Set the theme by name; unknown names are ignored.
    pub fn set_theme(&mut self, value: &str) -> bool {
        self.prefs.set_theme(value, &mut self.appearance)
    }

    /// Set the color mode by name; unknown names are ignored.
    pub fn set_color_mode(&mut self, value: &str) -> bool {
        self.prefs.set_color_mode(value, &mut self.appearance)
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.clamp_selection();
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected_index = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_selection();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current view models to a JSON file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StatusClass;
    use crate::prefs::{ColorMode, MemoryStore, ThemeName, COLOR_MODE_KEY};
    use crate::source::{ChannelSource, RawEndpoint, RawResult, StatusSender};

    fn now() -> DateTime<Utc> {
        crate::data::format::parse_timestamp("2025-01-15T12:00:00Z").unwrap()
    }

    fn endpoint(name: &str, success: Option<bool>) -> RawEndpoint {
        RawEndpoint {
            name: name.to_string(),
            group: None,
            key: name.to_lowercase(),
            results: success
                .map(|success| RawResult {
                    status: Some(200),
                    hostname: None,
                    duration: 1_000_000,
                    timestamp: "2025-01-15T11:59:00Z".to_string(),
                    condition_results: vec![],
                    success,
                })
                .into_iter()
                .collect(),
        }
    }

    fn test_app() -> (StatusSender, App) {
        let (tx, source) = ChannelSource::create("test");
        let prefs = PreferenceStore::new(MemoryStore::with_entries([(COLOR_MODE_KEY, "dark")]));
        let app = App::with_appearance(Box::new(source), prefs, Appearance::with_system_dark(true));
        (tx, app)
    }

    fn loaded_app() -> (StatusSender, App) {
        let (tx, mut app) = test_app();
        tx.send(vec![
            endpoint("Alpha", Some(true)),
            endpoint("Beta", Some(false)),
            endpoint("Gamma", None),
            endpoint("Delta", Some(true)),
        ]);
        assert!(app.reload_data_at(now()));
        (tx, app)
    }

    #[test]
    fn test_reload_builds_view_models() {
        let (_tx, app) = loaded_app();
        let data = app.data.as_ref().unwrap();

        assert_eq!(data.endpoints.len(), 4);
        assert_eq!(data.summary.healthy, 2);
        assert_eq!(data.endpoints[1].status_class, StatusClass::Unhealthy);
        assert!(app.load_error.is_none());
        assert!(app.last_fetch.is_some());
    }

    #[test]
    fn test_reload_without_new_data() {
        let (_tx, mut app) = loaded_app();
        assert!(!app.reload_data_at(now()));
        assert!(app.data.is_some());
    }

    #[test]
    fn test_source_error_sets_flag() {
        let (tx, mut app) = test_app();
        tx.fail("Failed to parse response: expected value");

        assert!(!app.reload_data());
        assert!(app.data.is_none());
        assert!(app.load_error.as_deref().unwrap().contains("parse"));
    }

    #[test]
    fn test_recovers_after_failed_fetch() {
        let (tx, mut app) = loaded_app();
        tx.fail("Request timed out");
        assert!(!app.reload_data_at(now()));
        assert!(app.load_error.is_some());

        tx.send(vec![endpoint("Alpha", Some(true))]);
        assert!(app.reload_data_at(now()));
        assert!(app.load_error.is_none());
        assert_eq!(app.data.as_ref().unwrap().endpoints.len(), 1);
    }

    #[test]
    fn test_problems_view_filters() {
        let (_tx, mut app) = loaded_app();
        app.set_view(View::Problems);

        let names: Vec<_> = app.visible_endpoints().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Gamma"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let (_tx, mut app) = loaded_app();
        app.select_last();
        assert_eq!(app.selected_index, 3);
        app.select_next_n(10);
        assert_eq!(app.selected_index, 3);
        assert_eq!(app.selected_endpoint().unwrap().name, "Delta");

        app.select_prev_n(10);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_follows_shrinking_data() {
        let (tx, mut app) = loaded_app();
        app.select_last();

        tx.send(vec![endpoint("Alpha", Some(true))]);
        assert!(app.reload_data_at(now()));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_filter() {
        let (_tx, mut app) = loaded_app();
        app.start_filter();
        for c in "ta".chars() {
            app.filter_push(c);
        }

        let names: Vec<_> = app.visible_endpoints().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Delta"]);

        app.clear_filter();
        assert_eq!(app.visible_endpoints().len(), 4);
        assert!(!app.filter_active);
    }

    #[test]
    fn test_detail_overlay() {
        let (_tx, mut app) = loaded_app();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);

        app.set_view(View::List);
        app.go_back();
        assert_eq!(app.current_view, View::Grid);
    }

    #[test]
    fn test_detail_requires_selection() {
        let (_tx, mut app) = test_app();
        app.enter_detail();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_view_cycle() {
        let (_tx, mut app) = test_app();
        app.next_view();
        assert_eq!(app.current_view, View::List);
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Grid);
        app.prev_view();
        assert_eq!(app.current_view, View::Problems);
    }

    #[test]
    fn test_preferences_are_applied_on_start() {
        let (_tx, app) = test_app();
        assert_eq!(app.appearance().config().theme, ThemeName::Gatus);
        assert_eq!(app.appearance().config().color_mode, ColorMode::Dark);
        assert!(app.theme().dark);
    }

    #[test]
    fn test_cycle_theme_and_color_mode() {
        let (_tx, mut app) = test_app();

        app.cycle_theme();
        assert_eq!(app.theme().name, ThemeName::Github);
        assert_eq!(app.prefs.get_config().theme, ThemeName::Github);
        assert_eq!(app.get_status_message(), Some("Theme: github"));

        app.cycle_color_mode();
        assert_eq!(app.prefs.get_config().color_mode, ColorMode::System);
        assert!(app.theme().dark);
    }

    #[test]
    fn test_invalid_theme_leaves_everything() {
        let (_tx, mut app) = test_app();
        assert!(app.set_theme("tui"));

        assert!(!app.set_theme("not-a-theme"));
        assert_eq!(app.theme().name, ThemeName::Tui);
        assert_eq!(app.prefs.get_config().theme, ThemeName::Tui);
    }

    #[test]
    fn test_export_state() {
        let (_tx, app) = loaded_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total"], 4);
        assert_eq!(value["endpoints"][2]["statusClass"], "unknown");
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, app) = test_app();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("x.json")).is_err());
    }
}
