use anyhow::Context;
use http::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::GithubCredentials;
use error::UpstreamError;

pub mod error;
pub mod operations;

const USER_AGENT: &str = "github-relay";

/// Provides access to the GitHub REST API on behalf of the configured account.
///
/// The client is cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: GithubCredentials,
}

impl GithubClient {
    pub fn new(base_url: Url, credentials: GithubCredentials) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Cannot build GitHub HTTP client")?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &GithubCredentials {
        &self.credentials
    }

    /// Username of the account whose data is accessed.
    pub fn account(&self) -> Result<&str, UpstreamError> {
        self.credentials
            .username()
            .ok_or(UpstreamError::MissingAccount)
    }

    /// Appends the given path segments to the base URL.
    /// Every segment is percent-encoded, so it cannot escape its position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl {
                base: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, UpstreamError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("Sending GET {url}");
        let response = self.authorize(self.client.get(url)).send().await?;
        read_response(response).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, UpstreamError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("Sending POST {url}");
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }
}

async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let status = response.status();
    let url = response.url().clone();
    let text = response.text().await?;

    tracing::trace!("Response from `{url}`: {status} ({text})");

    if !status.is_success() {
        return Err(UpstreamError::Status { status, body: text });
    }
    Ok(serde_json::from_str(&text)?)
}
