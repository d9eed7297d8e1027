//! Uniform success/failure value returned by every render entry point.

use serde::{Deserialize, Serialize};

/// `{result, data}` envelope.
///
/// On success `data` is the rendered text or the path of a materialized file.
/// On failure it is a human-readable error. The script engine returns an
/// envelope with neither field set when the script does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Envelope {
    pub fn success(data: impl Into<String>) -> Self {
        Self { result: Some(true), data: Some(data.into()) }
    }

    pub fn failure(data: impl Into<String>) -> Self {
        Self { result: Some(false), data: Some(data.into()) }
    }

    /// `{}`: the missing-script case.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.result == Some(true)
    }

    pub fn is_failure(&self) -> bool {
        self.result == Some(false)
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_none() && self.data.is_none()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}
