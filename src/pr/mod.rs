pub mod types;

pub use types::PullRequestRecord;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::commit::Commit;

const USER_AGENT: &str = "pr-release-analyzer";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for pull request #{number}")]
    Status {
        status: reqwest::StatusCode,
        number: u64,
    },
}

/// Provider of pull request metadata.
///
/// The projector only ever needs this one call, and issues it at most once
/// per invocation; tests substitute a counting mock through this seam.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestRecord, FetchError>;
}

/// GitHub REST provider. Failures surface as-is: no retries, no timeout of
/// its own; that policy belongs to the caller.
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> GithubClient {
        GithubClient {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    fn pull_url(&self, owner: &str, repo: &str, number: u64) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/pulls/{}",
            owner, repo, number
        )
    }

    /// List the pull request's commits, most recent first.
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pr = number))]
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Commit>, FetchError> {
        #[derive(serde::Deserialize)]
        struct CommitEntry {
            commit: CommitDetail,
        }

        #[derive(serde::Deserialize)]
        struct CommitDetail {
            message: String,
        }

        debug!("fetching pull request commits from GitHub API");
        let response = self
            .http
            .get(format!("{}/commits", self.pull_url(owner, repo, number)))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                number,
            });
        }

        let entries = response.json::<Vec<CommitEntry>>().await?;
        debug!(commits = entries.len(), "received pull request commits");

        Ok(commits_newest_first(
            entries.into_iter().map(|entry| entry.commit.message).collect(),
        ))
    }
}

/// Shape raw commit messages into projector input. GitHub lists a pull
/// request's commits oldest first; the projector treats the last element as
/// the earliest commit, so the order is reversed to newest first.
fn commits_newest_first(messages: Vec<String>) -> Vec<Commit> {
    let mut commits: Vec<Commit> = messages
        .iter()
        .map(|message| Commit::from_message(message))
        .collect();
    commits.reverse();
    commits
}

#[async_trait]
impl PullRequestSource for GithubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pr = number))]
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestRecord, FetchError> {
        #[derive(serde::Deserialize)]
        struct PullResponse {
            title: String,
            body: Option<String>,
        }

        debug!("fetching pull request metadata from GitHub API");
        let response = self
            .http
            .get(self.pull_url(owner, repo, number))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                number,
            });
        }

        let payload = response.json::<PullResponse>().await?;
        debug!(title = %payload.title, "received pull request metadata");

        Ok(PullRequestRecord::new(
            payload.title,
            payload.body.unwrap_or_default(),
        ))
    }
}
