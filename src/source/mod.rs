//! Data source abstraction for receiving endpoint statuses.
//!
//! This module provides a trait-based abstraction for receiving status data
//! from various sources (the Gatus HTTP API, JSON files, in-memory channels).

mod channel;
mod file;
mod http;
mod snapshot;

pub use channel::{ChannelSource, StatusSender};
pub use file::FileSource;
pub use http::{HttpSource, StatusClient, STATUSES_PATH};
pub use snapshot::{RawConditionResult, RawEndpoint, RawResult, StatusSnapshot};

use std::fmt::Debug;

/// Trait for receiving endpoint statuses from various sources.
///
/// Implementations of this trait provide status snapshots from different
/// backends - HTTP polling, file polling, or in-memory channels.
///
/// # Example
///
/// ```
/// use gatus_tui::{DataSource, FileSource};
///
/// let mut source = FileSource::new("statuses.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} endpoints", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<StatusSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the most recent fetch failed.
    fn error(&self) -> Option<&str>;

    /// Ask the source to fetch again as soon as possible.
    ///
    /// Sources that are always current ignore this.
    fn request_refresh(&mut self) {}
}
