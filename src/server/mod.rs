use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::github::api::operations::{get_repository, get_user_activity};
use crate::github::{GithubClient, RepositorySummary, UserSummary};

pub use error::{ErrorBody, RelayError};

mod error;
mod issues;

/// Shared server state for all axum handlers.
pub struct ServerState {
    github: GithubClient,
}

impl ServerState {
    pub fn new(github: GithubClient) -> Self {
        Self { github }
    }

    pub fn github(&self) -> &GithubClient {
        &self.github
    }
}

#[derive(Clone)]
pub struct ServerStateRef(pub Arc<ServerState>);

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", get(user_activity_handler))
        .route("/github/{repo_name}", get(repository_handler))
        .route("/github/{repo_name}/issues", post(issues::create_issue_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(ServerStateRef(Arc::new(state)))
        .fallback(not_found_handler)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Router panicked: {err:?}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
            message: None,
            details: None,
        }),
    )
        .into_response()
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
            message: None,
            details: None,
        }),
    )
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Followers of the configured account and a summary of its repositories.
async fn user_activity_handler(
    State(ServerStateRef(state)): State<ServerStateRef>,
) -> Result<Json<UserSummary>, RelayError> {
    let summary = get_user_activity(state.github())
        .await
        .map_err(RelayError::UserActivity)?;
    Ok(Json(summary))
}

/// Repository name from the request path, taken verbatim after percent-decoding.
fn repo_name_from_path(path: Result<Path<String>, PathRejection>) -> Result<String, RelayError> {
    path.map(|Path(name)| name)
        .map_err(|rejection| RelayError::InvalidRepositoryName(rejection.body_text()))
}

async fn repository_handler(
    path: Result<Path<String>, PathRejection>,
    State(ServerStateRef(state)): State<ServerStateRef>,
) -> Result<Json<RepositorySummary>, RelayError> {
    let repo_name = repo_name_from_path(path)?;
    match get_repository(state.github(), &repo_name).await {
        Ok(repo) => Ok(Json(repo)),
        Err(source) => Err(RelayError::RepositoryNotFound {
            name: repo_name,
            source,
        }),
    }
}
