use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::Span;

use crate::github::{GithubRepoName, UpstreamError};
use crate::utils::logging::LogError;

const GENERIC_FETCH_ERROR: &str = "Error fetching data from GitHub";

/// JSON body of every error response returned by the relay.
#[derive(serde::Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Failure of a relay endpoint. Each variant knows which status code and body it is
/// reported with.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Invalid repository name: {0}")]
    InvalidRepositoryName(String),
    #[error("Title is required")]
    MissingTitle,
    #[error("Body is required")]
    MissingBody,
    #[error("GitHub authentication details are missing")]
    MissingCredentials,
    #[error("Cannot load user activity: {0}")]
    UserActivity(#[source] UpstreamError),
    #[error("Cannot load repository `{name}`: {source}")]
    RepositoryNotFound { name: String, source: UpstreamError },
    #[error("Cannot create issue in `{repo}`: {source}")]
    IssueCreation {
        repo: GithubRepoName,
        source: UpstreamError,
    },
}

impl RelayError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            RelayError::InvalidBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Invalid request body").message(message),
            ),
            RelayError::InvalidRepositoryName(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Invalid repository name").message(message),
            ),
            RelayError::MissingTitle => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Title is required"),
            ),
            RelayError::MissingBody => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("Body is required"))
            }
            RelayError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("GitHub authentication details are missing").message(
                    "Please check if GITHUB_USERNAME and GITHUB_TOKEN are properly set in the environment variables.",
                ),
            ),
            RelayError::UserActivity(error) => {
                let message = match &error {
                    UpstreamError::Status { .. } => error
                        .github_message()
                        .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string()),
                    UpstreamError::Decode(_) | UpstreamError::MissingAccount => error.to_string(),
                    UpstreamError::Transport(_) | UpstreamError::InvalidUrl { .. } => {
                        GENERIC_FETCH_ERROR.to_string()
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
            // Every failure is reported as a missing repository, including authentication
            // and server errors.
            RelayError::RepositoryNotFound { name, .. } => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(format!("Repository '{name}' not found")),
            ),
            RelayError::IssueCreation { repo, source } => issue_creation_error(&repo, source),
        }
    }
}

fn issue_creation_error(repo: &GithubRepoName, error: UpstreamError) -> (StatusCode, ErrorBody) {
    let details = error.details();
    match error.status() {
        Some(StatusCode::NOT_FOUND) => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("Repository not found")
                .message(format!(
                    "The repository '{}' under the user '{}' could not be found.",
                    repo.name(),
                    repo.owner()
                ))
                .details(details),
        ),
        Some(StatusCode::UNAUTHORIZED) => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("Unauthorized")
                .message("GitHub token is invalid or does not have required permissions.")
                .details(details),
        ),
        Some(StatusCode::UNPROCESSABLE_ENTITY) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody::new("Unprocessable Entity")
                .message(
                    "The data provided for the issue may be invalid. Please check the title and body format.",
                )
                .details(details),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("Error creating the issue")
                .message(error.to_string())
                .details(details),
        ),
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::InvalidBody(_)
            | RelayError::InvalidRepositoryName(_)
            | RelayError::MissingTitle
            | RelayError::MissingBody => {
                tracing::debug!("Rejected request: {self}");
            }
            RelayError::MissingCredentials => {
                tracing::error!("{self}");
            }
            RelayError::UserActivity(_)
            | RelayError::RepositoryNotFound { .. }
            | RelayError::IssueCreation { .. } => {
                Span::current().log_error(&self);
            }
        }
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
