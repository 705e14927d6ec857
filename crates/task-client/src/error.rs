//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Error returned by [`crate::ApiClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or an undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body; `message` is user facing
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The access token was rejected and could not be refreshed
    #[error("Session expired, please log in again")]
    SessionExpired,
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::SessionExpired => None,
        }
    }

    /// Server error code of an API error (e.g. `INVALID_TOKEN`)
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Build an API error from a status and raw response body
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: parsed.code,
                message: parsed.error,
            },
            Err(_) => Self::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: if body.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    body.to_string()
                },
            },
        }
    }
}

/// Server error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
