//! # gatus-tui
//!
//! A terminal dashboard and library for the status of endpoints monitored
//! by a [Gatus](https://github.com/TwiN/gatus) server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(view models)  │(rendering)   │         │  │
//! │  └──┬───┬──┘    └──────────┘    └─────────┘    └─────────┘  │
//! │     │   │                                                   │
//! │     ▼   ▼                                                   │
//! │  ┌────────┐ ┌───────┐                                       │
//! │  │ source │ │ prefs │◀── theme / color mode, persisted      │
//! │  └────────┘ └───────┘                                       │
//! │      ▲                                                      │
//! │      └── HttpSource | FileSource | ChannelSource            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`DataSource`] trait and its implementations, plus
//!   the raw wire types of the statuses API
//! - **[`data`]**: duration and timestamp formatting, and the transform from
//!   raw endpoints to display-ready [`EndpointView`]s
//! - **[`prefs`]**: persisted theme and color mode, pushed to any
//!   [`PresentationTarget`]
//! - **[`settings`]**: defaults, config file and environment layering
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the interactive dashboard
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a live server
//! gatus-tui --url https://status.example.com
//!
//! # Read a saved response
//! gatus-tui --file statuses.json
//! ```
//!
//! ### Transforming a response
//!
//! ```
//! use gatus_tui::{preprocess_endpoints, RawEndpoint};
//!
//! let body = r#"[{"name": "API", "key": "core_api", "results": []}]"#;
//! let raw: Vec<RawEndpoint> = serde_json::from_str(body).unwrap();
//!
//! let processed = preprocess_endpoints(&raw);
//! assert_eq!(processed.endpoints[0].status_label, "Unknown");
//! assert_eq!(processed.summary.unknown, 1);
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use gatus_tui::{App, ChannelSource, PreferenceStore};
//!
//! let (tx, source) = ChannelSource::create("embedded");
//! let mut app = App::new(Box::new(source), PreferenceStore::in_memory());
//!
//! // Statuses fetched elsewhere in the host
//! tx.send(Vec::new());
//! assert!(app.reload_data());
//!
//! tx.fail("connection refused");
//! app.reload_data();
//! assert!(app.load_error.is_some());
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod prefs;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    format_duration, format_timestamp, preprocess_endpoint, preprocess_endpoints, EndpointView,
    ProcessedEndpoints, StatusClass, Summary,
};
pub use error::{FetchError, PrefsError};
pub use prefs::{ColorMode, PreferenceStore, PresentationTarget, ThemeConfig, ThemeName};
pub use source::{
    ChannelSource, DataSource, FileSource, HttpSource, RawConditionResult, RawEndpoint,
    RawResult, StatusClient, StatusSender, StatusSnapshot,
};
