//! Raw types for the Gatus endpoint statuses API.
//!
//! These types match the JSON returned by `GET /api/v1/endpoints/statuses`.
//! Fields the dashboard does not use (`events`, `uptime`, ...) are ignored
//! on deserialization.

use serde::{Deserialize, Serialize};

/// A complete response from the statuses endpoint.
///
/// Order is the order the server returned; view models keep it.
pub type StatusSnapshot = Vec<RawEndpoint>;

/// One monitored target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEndpoint {
    /// Display name.
    pub name: String,

    /// Optional display group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Stable unique identifier (e.g. `backend_api`).
    pub key: String,

    /// Check results, newest first. May be empty when no check has been
    /// retained yet.
    #[serde(default)]
    pub results: Vec<RawResult>,
}

impl RawEndpoint {
    /// The most recent check result, if any.
    pub fn latest(&self) -> Option<&RawResult> {
        self.results.first()
    }
}

/// One health-check outcome for an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    /// HTTP-like response code, if the check produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Elapsed time in nanoseconds.
    #[serde(default)]
    pub duration: i64,

    /// ISO-8601 time the check ran.
    #[serde(default)]
    pub timestamp: String,

    /// Conditions in evaluation order.
    #[serde(default)]
    pub condition_results: Vec<RawConditionResult>,

    /// True iff every condition passed.
    #[serde(default)]
    pub success: bool,
}

/// A single named assertion evaluated during a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConditionResult {
    pub condition: String,
    pub success: bool,
}
