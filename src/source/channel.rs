//! Channel-based data source.
//!
//! For hosts that already fetch Gatus statuses themselves and want the
//! dashboard to show them. The host pushes either a fresh snapshot or the
//! reason its fetch failed; failures drive the same "unable to load" state
//! as a failed HTTP fetch.

use tokio::sync::watch;

use super::{DataSource, StatusSnapshot};

type Update = Option<Result<StatusSnapshot, String>>;

/// Producer half of a [`ChannelSource`].
///
/// Only the latest update is kept; the dashboard never sees stale ones.
#[derive(Debug, Clone)]
pub struct StatusSender {
    tx: watch::Sender<Update>,
}

impl StatusSender {
    /// Publish a freshly fetched statuses response.
    pub fn send(&self, snapshot: StatusSnapshot) {
        self.tx.send_replace(Some(Ok(snapshot)));
    }

    /// Report that the latest fetch failed.
    pub fn fail(&self, reason: impl Into<String>) {
        self.tx.send_replace(Some(Err(reason.into())));
    }

    /// Whether the dashboard side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A data source fed by a [`StatusSender`].
///
/// # Example
///
/// ```
/// use gatus_tui::{ChannelSource, DataSource};
///
/// let (tx, mut source) = ChannelSource::create("embedded");
/// assert!(source.poll().is_none());
///
/// tx.fail("connection refused");
/// assert!(source.poll().is_none());
/// assert_eq!(source.error(), Some("connection refused"));
///
/// tx.send(Vec::new());
/// assert!(source.poll().is_some());
/// assert!(source.error().is_none());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Update>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a connected sender and source.
    ///
    /// The source has nothing to report until the first update is sent.
    pub fn create(source_description: &str) -> (StatusSender, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self {
            receiver: rx,
            description: format!("channel: {}", source_description),
            last_error: None,
        };
        (StatusSender { tx }, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        // A dropped sender keeps the last state on screen
        if !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }

        let update = self.receiver.borrow_and_update().clone();
        match update? {
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(reason) => {
                self.last_error = Some(reason);
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawEndpoint;

    fn api() -> RawEndpoint {
        RawEndpoint {
            name: "API".to_string(),
            group: None,
            key: "api".to_string(),
            results: vec![],
        }
    }

    #[test]
    fn test_nothing_before_first_update() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
        assert_eq!(source.description(), "channel: test");
    }

    #[test]
    fn test_snapshot_delivered_once() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(vec![api()]);

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot[0].key, "api");
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_only_latest_update_is_seen() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(vec![api()]);
        tx.send(vec![api(), api()]);

        assert_eq!(source.poll().unwrap().len(), 2);
    }

    #[test]
    fn test_failure_then_recovery() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.fail("HTTP error with status code: 502");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("502"));

        // The error sticks until a snapshot arrives
        assert!(source.poll().is_none());
        assert!(source.error().is_some());

        tx.send(vec![api()]);
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_sender_sees_dropped_source() {
        let (tx, source) = ChannelSource::create("test");
        assert!(!tx.is_closed());
        drop(source);
        assert!(tx.is_closed());
    }
}
