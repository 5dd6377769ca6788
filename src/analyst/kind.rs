//! Policy trait describing one kind of spatial analysis.

use serde::de::DeserializeOwned;
use std::fmt;

/// Why a submission was dropped before a task was created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    BaseUrlUnset,
    MissingField(&'static str),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::BaseUrlUnset => write!(f, "service base URL is not set"),
            RejectReason::MissingField(field) => write!(f, "required field '{field}' is empty"),
        }
    }
}

/// Everything that differs between analysis services
///
/// An implementation validates its parameters, turns them into the JSON body,
/// names the resource path under the service root, and fixes the response type.
/// The dispatch, URL assembly and result bookkeeping are shared.
pub trait AnalysisKind: Send + Sync + 'static {
    type Params: Send + Sync + 'static;
    type Output: DeserializeOwned + Default + Send + Sync + 'static;

    /// Short name used in logs and dispatcher ids
    const NAME: &'static str;

    fn validate(params: &Self::Params) -> Result<(), RejectReason>;

    fn payload(params: &Self::Params) -> Result<serde_json::Value, serde_json::Error>;

    /// Path segments below the base URL; each is percent-encoded separately
    fn resource_path(params: &Self::Params) -> Vec<&str>;
}

/// Reject blank identifiers the same way for every kind
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> Result<(), RejectReason> {
    if value.is_empty() {
        Err(RejectReason::MissingField(field))
    } else {
        Ok(())
    }
}
