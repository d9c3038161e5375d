use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::github::api::operations::create_issue;
use crate::github::{CreatedIssue, GithubRepoName, NewIssue};
use crate::server::{repo_name_from_path, RelayError, ServerStateRef};

/// Payload of an issue creation request, before validation.
#[derive(Deserialize, Debug)]
pub struct IssueForm {
    title: Option<String>,
    body: Option<String>,
}

impl IssueForm {
    /// Checks that the title and body are present and non-empty, in this order.
    fn validate(self) -> Result<NewIssue, RelayError> {
        let title = self
            .title
            .filter(|title| !title.is_empty())
            .ok_or(RelayError::MissingTitle)?;
        let body = self
            .body
            .filter(|body| !body.is_empty())
            .ok_or(RelayError::MissingBody)?;
        Ok(NewIssue { title, body })
    }
}

/// Creates an issue in a repository of the configured account.
///
/// The request is validated before anything is sent to GitHub.
pub async fn create_issue_handler(
    path: Result<Path<String>, PathRejection>,
    State(ServerStateRef(state)): State<ServerStateRef>,
    payload: Result<Json<IssueForm>, JsonRejection>,
) -> Result<Json<CreatedIssue>, RelayError> {
    let repo_name = repo_name_from_path(path)?;
    let Json(form) = payload.map_err(|rejection| RelayError::InvalidBody(rejection.body_text()))?;
    let issue = form.validate()?;

    let Some((username, _)) = state.github().credentials().complete() else {
        return Err(RelayError::MissingCredentials);
    };
    let repo = GithubRepoName::new(username, &repo_name);

    match create_issue(state.github(), &repo, &issue).await {
        Ok(created) => Ok(Json(created)),
        Err(source) => Err(RelayError::IssueCreation { repo, source }),
    }
}
