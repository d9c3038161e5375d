//! Contains definitions of the reduced (projected) shapes of GitHub data that are
//! returned by the relay.
use std::fmt::{Debug, Display, Formatter};

use serde::Serialize;

pub mod api;

pub use api::error::UpstreamError;
pub use api::GithubClient;

/// Repository of the configured account, identified by its owner and name.
///
/// The name is kept verbatim, as it was received in the request path.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// Followers of the account together with a short list of its repositories.
#[derive(Serialize, Debug, PartialEq)]
pub struct UserSummary {
    pub followers: u64,
    pub following: u64,
    pub repos: Vec<RepositoryLink>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RepositoryLink {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub issues_url: String,
}

/// Title and body of an issue that should be created.
#[derive(Serialize, Debug, Clone)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CreatedIssue {
    #[serde(rename = "issueUrl")]
    pub issue_url: String,
}
