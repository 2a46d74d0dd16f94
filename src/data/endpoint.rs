//! Endpoint view models and the status transform.
//!
//! This module turns raw endpoint records from the statuses API into
//! display-ready view models. Only the latest result of each endpoint is
//! consulted; older history is ignored.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format::{
    format_duration, format_relative, format_timestamp_at, parse_timestamp, UNKNOWN,
};
use crate::source::{RawConditionResult, RawEndpoint, RawResult};

/// Glyph for a passed condition.
pub const ICON_SUCCESS: &str = "\u{2713}";
/// Glyph for a failed condition.
pub const ICON_FAILURE: &str = "\u{2717}";

const ICON_CLASS_SUCCESS: &str = "condition-icon-success";
const ICON_CLASS_FAILURE: &str = "condition-icon-failure";

/// Status of an endpoint, derived from its latest result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Healthy,
    Unhealthy,
    /// No result retained for the endpoint.
    Unknown,
}

impl StatusClass {
    /// Derive the status from an endpoint's latest result.
    pub fn from_latest(latest: Option<&RawResult>) -> Self {
        match latest {
            None => StatusClass::Unknown,
            Some(result) if result.success => StatusClass::Healthy,
            Some(_) => StatusClass::Unhealthy,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusClass::Healthy => "Healthy",
            StatusClass::Unhealthy => "Unhealthy",
            StatusClass::Unknown => "Unknown",
        }
    }

    /// Returns the lowercase class name used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Healthy => "healthy",
            StatusClass::Unhealthy => "unhealthy",
            StatusClass::Unknown => "unknown",
        }
    }
}

/// A condition prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionView {
    pub condition: String,
    pub icon: &'static str,
    pub icon_class: &'static str,
    #[serde(skip)]
    pub success: bool,
}

impl From<&RawConditionResult> for ConditionView {
    fn from(cr: &RawConditionResult) -> Self {
        let (icon, icon_class) = if cr.success {
            (ICON_SUCCESS, ICON_CLASS_SUCCESS)
        } else {
            (ICON_FAILURE, ICON_CLASS_FAILURE)
        };
        Self {
            condition: cr.condition.clone(),
            icon,
            icon_class,
            success: cr.success,
        }
    }
}

/// Display fields that exist only when the endpoint has a latest result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub formatted_duration: String,
    pub formatted_timestamp: String,
    /// Serialized as `null` when the check produced no code.
    pub http_status: Option<u16>,
    pub has_conditions: bool,
    /// Populated only when `has_conditions` is true.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionView>,
    #[serde(skip)]
    pub hostname: Option<String>,
}

/// Display-ready view of one endpoint.
///
/// Recomputed from scratch on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointView {
    /// Position in the response this view was built from.
    pub index: usize,
    pub name: String,
    /// Serialized as `null` when absent.
    pub group: Option<String>,
    pub key: String,
    pub status_class: StatusClass,
    pub status_label: &'static str,
    pub has_result: bool,
    #[serde(flatten)]
    pub result: Option<ResultView>,
}

impl EndpointView {
    /// Check if the endpoint name or group contains `needle` (case-insensitive).
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.group.as_ref().is_some_and(|g| g.to_lowercase().contains(&needle))
    }

    /// Name prefixed by group, e.g. `core/API`.
    pub fn display_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{}/{}", group, self.name),
            None => self.name.clone(),
        }
    }
}

/// Build the view model for one endpoint at position `index`.
///
/// Relative timestamps are computed against `now`.
pub fn preprocess_endpoint_at(
    endpoint: &RawEndpoint,
    index: usize,
    now: DateTime<Utc>,
) -> EndpointView {
    let latest = endpoint.latest();
    let status_class = StatusClass::from_latest(latest);

    let result = latest.map(|r| {
        let has_conditions = !r.condition_results.is_empty();
        ResultView {
            formatted_duration: format_duration(r.duration),
            formatted_timestamp: format_timestamp_at(&r.timestamp, now),
            http_status: r.status.filter(|code| *code != 0),
            has_conditions,
            conditions: r.condition_results.iter().map(ConditionView::from).collect(),
            hostname: r.hostname.clone().filter(|h| !h.is_empty()),
        }
    });

    EndpointView {
        index,
        name: endpoint.name.clone(),
        group: endpoint.group.clone().filter(|g| !g.is_empty()),
        key: endpoint.key.clone(),
        status_class,
        status_label: status_class.label(),
        has_result: latest.is_some(),
        result,
    }
}

/// Build the view model for one endpoint against the wall clock.
pub fn preprocess_endpoint(endpoint: &RawEndpoint, index: usize) -> EndpointView {
    preprocess_endpoint_at(endpoint, index, Utc::now())
}

/// Build view models for every endpoint, in input order.
pub fn preprocess_endpoints_at(
    endpoints: &[RawEndpoint],
    now: DateTime<Utc>,
) -> ProcessedEndpoints {
    let views: Vec<EndpointView> = endpoints
        .iter()
        .enumerate()
        .map(|(index, endpoint)| preprocess_endpoint_at(endpoint, index, now))
        .collect();

    let summary = Summary::compute(endpoints, &views, now);

    ProcessedEndpoints {
        endpoints: views,
        summary,
    }
}

/// Build view models for every endpoint against the wall clock.
pub fn preprocess_endpoints(endpoints: &[RawEndpoint]) -> ProcessedEndpoints {
    preprocess_endpoints_at(endpoints, Utc::now())
}

/// Aggregate counts over one set of view models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub unknown: usize,
    /// Most recent latest-result timestamp, formatted; `Unknown` if none.
    pub last_updated: String,
}

impl Summary {
    fn compute(endpoints: &[RawEndpoint], views: &[EndpointView], now: DateTime<Utc>) -> Self {
        let count = |class: StatusClass| views.iter().filter(|v| v.status_class == class).count();

        let newest = endpoints
            .iter()
            .filter_map(|e| e.latest())
            .filter_map(|r| parse_timestamp(&r.timestamp))
            .max();

        Self {
            total: views.len(),
            healthy: count(StatusClass::Healthy),
            unhealthy: count(StatusClass::Unhealthy),
            unknown: count(StatusClass::Unknown),
            last_updated: newest
                .map(|ts| format_relative(ts, now))
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    /// Worst status present, used for the header indicator.
    pub fn overall(&self) -> StatusClass {
        if self.unhealthy > 0 {
            StatusClass::Unhealthy
        } else if self.unknown > 0 || self.total == 0 {
            StatusClass::Unknown
        } else {
            StatusClass::Healthy
        }
    }
}

/// Complete transformed response, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedEndpoints {
    pub endpoints: Vec<EndpointView>,
    pub summary: Summary,
}

impl ProcessedEndpoints {
    /// Load and transform a statuses JSON file.
    pub fn load(path: &Path, now: DateTime<Utc>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, now)
    }

    /// Parse and transform a statuses JSON body.
    pub fn parse(content: &str, now: DateTime<Utc>) -> Result<Self> {
        let endpoints: Vec<RawEndpoint> = serde_json::from_str(content)?;
        Ok(preprocess_endpoints_at(&endpoints, now))
    }

    /// Endpoints whose latest check failed.
    pub fn unhealthy(&self) -> impl Iterator<Item = &EndpointView> {
        self.with_status(StatusClass::Unhealthy)
    }

    /// Endpoints with no retained result.
    pub fn unknown(&self) -> impl Iterator<Item = &EndpointView> {
        self.with_status(StatusClass::Unknown)
    }

    /// Unhealthy and unknown endpoints, in input order.
    pub fn problems(&self) -> impl Iterator<Item = &EndpointView> {
        self.endpoints.iter().filter(|e| e.status_class != StatusClass::Healthy)
    }

    fn with_status(&self, class: StatusClass) -> impl Iterator<Item = &EndpointView> {
        self.endpoints.iter().filter(move |e| e.status_class == class)
    }
}
