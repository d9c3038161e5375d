use anyhow::Context;
use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use tower::ServiceExt;

use crate::config::GithubCredentials;
use crate::github::GithubClient;
use crate::server::{create_app, ServerState};


pub use mocks::{default_credentials, GitHubMockServer};

/// Base URL on which nothing listens, so every request fails before a response arrives.
pub const UNREACHABLE_GITHUB_URL: &str = "http://127.0.0.1:1";

/// Drives the relay router in-process against a simulated GitHub API.
pub struct RelayTester {
    app: Router,
    github: GitHubMockServer,
}

impl RelayTester {
    pub async fn start() -> Self {
        Self::with_credentials(default_credentials()).await
    }

    pub async fn with_credentials(credentials: GithubCredentials) -> Self {
        let github = GitHubMockServer::start().await;
        let app = create_app(ServerState::new(github.client_with(credentials)));
        Self { app, github }
    }

    /// Relay that forwards requests to `url` instead of the simulated API.
    pub async fn with_github_url(url: &str) -> Self {
        let github = GitHubMockServer::start().await;
        let client = GithubClient::new(url.parse().unwrap(), default_credentials()).unwrap();
        let app = create_app(ServerState::new(client));
        Self { app, github }
    }

    pub fn github(&self) -> &GitHubMockServer {
        &self.github
    }

    pub async fn request(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
        let response = self
            .app
            .clone()
            .oneshot(request.into_request()?)
            .await
            .context("Cannot send API request")?;
        let status = response.status();
        let body = String::from_utf8(
            axum::body::to_bytes(response.into_body(), 10 * 1024 * 1024)
                .await?
                .to_vec(),
        )?;
        tracing::debug!("Received response with status {status} and body `{body}`");
        Ok(ApiResponse { status, body })
    }
}

pub struct ApiRequest {
    method: Method,
    uri: String,
    body: Option<String>,
}

impl ApiRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_string(),
            body: None,
        }
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Self {
        Self::post_raw(uri, &body.to_string())
    }

    /// POST request with a JSON content type and an arbitrary body.
    pub fn post_raw(uri: &str, body: &str) -> Self {
        Self {
            method: Method::POST,
            uri: uri.to_string(),
            body: Some(body.to_string()),
        }
    }

    fn into_request(self) -> anyhow::Result<Request<Body>> {
        let builder = Request::builder().method(self.method).uri(self.uri);
        let request = match self.body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        };
        Ok(request?)
    }
}

pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Unexpected status code, response body: {}",
            self.body
        );
        self
    }

    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not valid JSON")
    }
}
