//! # Client Constants
//!
//! Wire-level constants shared by every analysis service, plus the status tag
//! delivered with each listener invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome tag accompanying every listener invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The round-trip finished; the result may or may not have been replaced
    Complete,
    /// Encoding, transport or decoding failed; the result is unchanged
    Failed,
}

impl EventStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, EventStatus::Complete)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Complete => write!(f, "complete"),
            EventStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Query parameters appended to every analysis request
pub mod query {
    pub const ASYNCHRONOUS_RETURN: &str = "asynchronousReturn";
    pub const RETURN_CONTENT: &str = "returnContent";
}

pub mod system {
    /// Worker slots per service when not configured otherwise
    pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

    /// Timeout applied when the configured value is the "use default" sentinel
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

    /// Configured timeout value meaning "use the default timeout"
    pub const TIMEOUT_SENTINEL: i64 = -1;

    pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
}
