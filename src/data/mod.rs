//! Data models and processing for endpoint statuses.
//!
//! This module handles the transformation of raw API responses into
//! display-ready view models.
//!
//! ## Submodules
//!
//! - [`format`]: Duration and timestamp humanization (e.g. "50ms", "2m ago")
//! - [`endpoint`]: View models ([`EndpointView`], [`ProcessedEndpoints`]) and the transform
//!
//! ## Data Flow
//!
//! ```text
//! StatusSnapshot (raw JSON array)
//!        │
//!        ▼
//! preprocess_endpoints()
//!        │
//!        ├──▶ EndpointView (status from the latest result, formatted fields)
//!        │
//!        └──▶ Summary (counts, most recent check)
//! ```

pub mod endpoint;
pub mod format;

pub use endpoint::{
    preprocess_endpoint, preprocess_endpoint_at, preprocess_endpoints, preprocess_endpoints_at,
    ConditionView, EndpointView, ProcessedEndpoints, ResultView, StatusClass, Summary,
};
pub use format::{format_duration, format_timestamp, format_timestamp_at};
