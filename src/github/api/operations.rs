use serde::Deserialize;

use crate::github::api::error::UpstreamError;
use crate::github::api::GithubClient;
use crate::github::{
    CreatedIssue, GithubRepoName, NewIssue, RepositoryLink, RepositorySummary, UserSummary,
};

#[derive(Deserialize, Debug)]
struct UserPayload {
    followers: u64,
    following: u64,
}

#[derive(Deserialize, Debug)]
struct RepositoryListItem {
    name: String,
    description: Option<String>,
    html_url: String,
}

#[derive(Deserialize, Debug)]
struct RepositoryPayload {
    name: String,
    description: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    issues_url: String,
}

#[derive(Deserialize, Debug)]
struct IssuePayload {
    html_url: String,
}

/// Loads the follower counts and the (first page of) repositories of the configured account.
///
/// Documentation:
/// - https://docs.github.com/en/rest/users/users#get-a-user
/// - https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user
pub async fn get_user_activity(client: &GithubClient) -> Result<UserSummary, UpstreamError> {
    let account = client.account()?;

    let user_path = ["users", account];
    let repos_path = ["users", account, "repos"];
    let (user, repos) = futures::try_join!(
        client.get::<UserPayload>(&user_path),
        client.get::<Vec<RepositoryListItem>>(&repos_path),
    )?;

    Ok(UserSummary {
        followers: user.followers,
        following: user.following,
        repos: repos
            .into_iter()
            .map(|repo| RepositoryLink {
                name: repo.name,
                description: repo.description,
                url: repo.html_url,
            })
            .collect(),
    })
}

/// Loads a single repository of the configured account.
///
/// Documentation: https://docs.github.com/en/rest/repos/repos#get-a-repository
pub async fn get_repository(
    client: &GithubClient,
    name: &str,
) -> Result<RepositorySummary, UpstreamError> {
    let account = client.account()?;
    let repo: RepositoryPayload = client.get(&["repos", account, name]).await?;
    Ok(RepositorySummary {
        name: repo.name,
        description: repo.description,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        issues_url: repo.issues_url,
    })
}

/// Opens a new issue. Every successful call creates another issue.
///
/// Documentation: https://docs.github.com/en/rest/issues/issues#create-an-issue
pub async fn create_issue(
    client: &GithubClient,
    repo: &GithubRepoName,
    issue: &NewIssue,
) -> Result<CreatedIssue, UpstreamError> {
    let created: IssuePayload = client
        .post(&["repos", repo.owner(), repo.name(), "issues"], issue)
        .await?;
    tracing::info!("Created issue {} in {repo}", created.html_url);
    Ok(CreatedIssue {
        issue_url: created.html_url,
    })
}
