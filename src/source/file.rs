//! File-based data source.
//!
//! Polls a JSON file holding a statuses response, e.g. one saved with
//! `curl http://gatus/api/v1/endpoints/statuses > statuses.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, StatusSnapshot};

/// A data source that reads endpoint statuses from a JSON file.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    force_reload: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            force_reload: false,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<StatusSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(snapshot) => {
                    self.last_error = None;
                    Some(snapshot)
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), "unparseable statuses file: {}", e);
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        let current_modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                // Gone or unreadable: report it and re-read in full once it returns
                if self.last_modified.take().is_some() {
                    tracing::warn!(path = %self.path.display(), "statuses file went away: {}", e);
                }
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        let file_changed = self.last_modified.is_none_or(|last| current_modified > last);
        let forced = std::mem::take(&mut self.force_reload);
        if !file_changed && !forced {
            return None;
        }

        // Recorded for failed reads too, so a bad file keeps its error until rewritten
        self.last_modified = Some(current_modified);
        self.read_file()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn request_refresh(&mut self) {
        self.force_reload = true;
    }
}
