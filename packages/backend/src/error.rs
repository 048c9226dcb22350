use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The service answered with a non-success status. `message` is the
    /// service's own description of the failure.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request to managed backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from managed backend: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Backend misconfigured: {0}")]
    Config(String),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Status code reported by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Build an [`BackendError::Api`] from an error response body. The REST,
/// identity and storage gateways each name the human-readable field
/// differently.
pub(crate) fn from_error_body(status: u16, body: &[u8]) -> BackendError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|field| json.get(field).and_then(|v| v.as_str()).map(str::to_string))
        })
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| format!("Managed backend responded with status {status}"));

    BackendError::api(status, message)
}
