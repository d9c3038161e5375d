use http::StatusCode;
use serde::Serialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::{default_credentials, Repository, User, DEFAULT_TOKEN};
use crate::config::GithubCredentials;
use crate::github::GithubClient;

/// Simulated GitHub REST API.
///
/// Endpoints mounted through the helpers below only answer requests that carry the
/// default bearer token.
pub struct GitHubMockServer {
    mock_server: MockServer,
}

impl GitHubMockServer {
    pub async fn start() -> Self {
        Self {
            mock_server: MockServer::start().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.mock_server
    }

    pub fn client(&self) -> GithubClient {
        self.client_with(default_credentials())
    }

    pub fn client_with(&self, credentials: GithubCredentials) -> GithubClient {
        GithubClient::new(self.mock_server.uri().parse().unwrap(), credentials).unwrap()
    }

    pub async fn mock_user(&self, user: &User) {
        self.authorized("GET", &format!("/users/{}", user.login))
            .respond_with(ResponseTemplate::new(200).set_body_json(user))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_user_repos(&self, username: &str, repos: &[Repository]) {
        self.authorized("GET", &format!("/users/{username}/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repos))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_repo(&self, owner: &str, repo: &Repository) {
        self.authorized("GET", &format!("/repos/{owner}/{}", repo.name))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo))
            .mount(&self.mock_server)
            .await;
    }

    /// Answers `POST /repos/{owner}/{repo}/issues` with the given status and body.
    /// The mock expects to be called exactly once.
    pub async fn mock_issue_creation<B: Serialize>(
        &self,
        owner: &str,
        repo: &str,
        status: StatusCode,
        body: B,
    ) {
        self.authorized("POST", &format!("/repos/{owner}/{repo}/issues"))
            .respond_with(ResponseTemplate::new(status.as_u16()).set_body_json(body))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_error<B: Serialize>(
        &self,
        http_method: &str,
        url_path: &str,
        status: StatusCode,
        body: B,
    ) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(status.as_u16()).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.mock_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
    }

    fn authorized(&self, http_method: &str, url_path: &str) -> wiremock::MockBuilder {
        Mock::given(method(http_method))
            .and(path(url_path))
            .and(header("Authorization", format!("Bearer {DEFAULT_TOKEN}")))
    }
}
