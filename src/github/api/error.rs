use http::StatusCode;
use thiserror::Error;
use url::Url;

/// Failure of a single request sent to the GitHub API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("GitHub username is not configured")]
    MissingAccount,
    #[error("Cannot build a GitHub API URL from `{base}`")]
    InvalidUrl { base: Url },
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Cannot decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Status code of the GitHub response, if GitHub answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body returned by GitHub.
    pub fn github_message(&self) -> Option<String> {
        let UpstreamError::Status { body, .. } = self else {
            return None;
        };
        let body: serde_json::Value = serde_json::from_str(body).ok()?;
        body.get("message")?.as_str().map(|message| message.to_string())
    }

    /// Details that are forwarded to the caller: the body returned by GitHub (parsed as
    /// JSON when possible), or the error text when no response was received.
    pub fn details(&self) -> serde_json::Value {
        match self {
            UpstreamError::Status { body, .. } => serde_json::from_str(body)
                .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
            error => serde_json::Value::String(error.to_string()),
        }
    }
}
