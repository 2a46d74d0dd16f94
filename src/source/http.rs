//! HTTP data source for a live Gatus server.
//!
//! Polls `GET {base}/api/v1/endpoints/statuses` from a background task and
//! hands parsed snapshots to the UI thread through a channel.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{DataSource, StatusSnapshot};
use crate::error::FetchError;

/// Path of the statuses endpoint, relative to the server base URL.
pub const STATUSES_PATH: &str = "/api/v1/endpoints/statuses";

/// One-shot client for the statuses endpoint.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    url: String,
}

impl StatusClient {
    /// Create a client for the Gatus server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: statuses_url(base_url),
        })
    }

    /// Full URL being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the current statuses.
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use gatus_tui::StatusClient;
    ///
    /// # tokio_test::block_on(async {
    /// let client = StatusClient::new("http://localhost:8080", Duration::from_secs(10)).unwrap();
    /// let snapshot = client.fetch().await.unwrap();
    /// println!("{} endpoints", snapshot.len());
    /// # });
    /// ```
    pub async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        debug!(url = %self.url, "fetching endpoint statuses");

        let response =
            self.client.get(&self.url).header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let snapshot: StatusSnapshot = serde_json::from_str(&body)?;

        debug!(endpoints = snapshot.len(), "fetched endpoint statuses");
        Ok(snapshot)
    }
}

/// Join a base URL and the statuses path.
pub fn statuses_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), STATUSES_PATH)
}

type FetchOutcome = Result<StatusSnapshot, String>;

/// A data source that polls the Gatus API on a fixed interval.
///
/// A background task fetches once immediately, then every `interval`, or
/// sooner when [`DataSource::request_refresh`] is called. Failed fetches are
/// not retried before the next scheduled one.
///
/// Must be created from within a tokio runtime.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gatus_tui::{DataSource, HttpSource, StatusClient};
///
/// # tokio_test::block_on(async {
/// let client = StatusClient::new("http://localhost:8080", Duration::from_secs(5)).unwrap();
/// let mut source = HttpSource::spawn(client, Duration::from_secs(30));
/// assert_eq!(source.description(), "http: http://localhost:8080/api/v1/endpoints/statuses");
///
/// // Nothing arrives until the first fetch completes
/// assert!(source.poll().is_none());
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<FetchOutcome>,
    description: String,
    last_error: Option<String>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl HttpSource {
    /// Spawn the polling task for `client`.
    pub fn spawn(client: StatusClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(4);
        let refresh = Arc::new(Notify::new());
        let notified = refresh.clone();
        let description = format!("http: {}", client.url());

        let task = tokio::spawn(async move {
            loop {
                let outcome = client.fetch().await.map_err(|e| {
                    warn!(url = %client.url(), "failed to fetch endpoint statuses: {}", e);
                    e.to_string()
                });

                if tx.send(outcome).await.is_err() {
                    // Receiver dropped
                    break;
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = notified.notified() => {}
                }
            }
        });

        Self {
            receiver: rx,
            description,
            last_error: None,
            refresh,
            task,
        }
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        match self.receiver.try_recv() {
            Ok(Ok(snapshot)) => {
                self.last_error = None;
                Some(snapshot)
            }
            Ok(Err(e)) => {
                self.last_error = Some(e);
                None
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.last_error = Some("Fetch task stopped".to_string());
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

    fn request_refresh(&mut self) {
        self.refresh.notify_one();
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"[{"name":"API","key":"api","results":[{"status":200,"duration":50000000,
        "timestamp":"2025-01-15T12:00:00Z","conditionResults":[],"success":true}]}]"#;

    /// Serve every connection with the same canned HTTP response.
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_statuses_url() {
        assert_eq!(
            statuses_url("http://localhost:8080/"),
            "http://localhost:8080/api/v1/endpoints/statuses"
        );
        assert_eq!(
            statuses_url("https://status.example.com"),
            "https://status.example.com/api/v1/endpoints/statuses"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let base = serve("200 OK", BODY).await;
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();

        let snapshot = client.fetch().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "API");
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let base = serve("500 Internal Server Error", "oops").await;
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let base = serve("200 OK", "<html>not json</html>").await;
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Grab a free port, then close it.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{}", addr);
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();
        assert!(client.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_http_source_polls() {
        let base = serve("200 OK", BODY).await;
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(60));
        assert!(source.description().starts_with("http: http://127.0.0.1:"));

        tokio::time::sleep(Duration::from_millis(300)).await;

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot[0].key, "api");
        assert!(source.error().is_none());

        // Next fetch is a minute away
        assert!(source.poll().is_none());

        source.request_refresh();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(source.poll().is_some());
    }

    #[tokio::test]
    async fn test_http_source_records_error() {
        let base = serve("503 Service Unavailable", "").await;
        let client = StatusClient::new(&base, Duration::from_secs(5)).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(60));

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("503"));
    }
}
