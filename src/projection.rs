use thiserror::Error;
use tracing::instrument;

use crate::commit::Commit;
use crate::config::Config;
use crate::pr::{FetchError, PullRequestSource};
use crate::strategy::Strategy;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("No commits found")]
    NoCommits,

    #[error("The pull request title is not equal to the first commit subject")]
    TitleMismatch,

    #[error("The pull request description is not equal to the first commit body")]
    BodyMismatch,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Fold a pull request's commits into the one commit the release tooling
/// analyzes.
///
/// `commits` must be ordered most recent first, the way a log hands them out;
/// the earliest commit of the pull request is therefore the last element.
/// Pull request metadata is fetched through `source` at most once, and only
/// for the strategies that need it. Whatever the strategy produces, the
/// subject is suffixed with ` (#N)` afterwards, matching the reference GitHub
/// puts on its own merge commits.
#[instrument(skip(commits, source, config), fields(strategy = %strategy, commits = commits.len(), pr = config.pr_number))]
pub async fn project(
    strategy: Strategy,
    commits: &[Commit],
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Commit, ProjectionError> {
    let commit = match strategy {
        Strategy::Github => github(commits, source, config).await?,
        Strategy::StrictGithub => strict_github(commits, source, config).await?,
        Strategy::PullRequest => fetch_as_commit(source, config).await?,
        Strategy::StrictPullRequest => strict_pull_request(commits, source, config).await?,
    };

    Ok(commit.with_pr_number(config.pr_number))
}

/// A lone commit is trusted as-is; anything else synthesizes the pull request
/// title over the folded commit bodies.
async fn github(
    commits: &[Commit],
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Commit, ProjectionError> {
    if commits.len() == 1 {
        return Ok(commits[0].clone());
    }

    let record = fetch_as_commit(source, config).await?;
    Ok(Commit::new(record.subject, fold_bodies(commits)))
}

/// `github`, gated on the pull request title matching the first commit's
/// subject. The record fetched for the check is reused for the synthesis;
/// one fetch per invocation.
async fn strict_github(
    commits: &[Commit],
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Commit, ProjectionError> {
    // No fetch for an empty list.
    let Some(first) = first_commit(commits) else {
        return Err(ProjectionError::NoCommits);
    };

    let record = fetch_as_commit(source, config).await?;
    if !record.same_subject(first) {
        return Err(ProjectionError::TitleMismatch);
    }

    if commits.len() == 1 {
        return Ok(commits[0].clone());
    }
    Ok(Commit::new(record.subject, fold_bodies(commits)))
}

/// The pull request record verbatim, gated on it matching the first commit's
/// subject and body.
async fn strict_pull_request(
    commits: &[Commit],
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Commit, ProjectionError> {
    // No fetch for an empty list.
    let Some(first) = first_commit(commits) else {
        return Err(ProjectionError::NoCommits);
    };

    let record = fetch_as_commit(source, config).await?;
    if !record.same_content(first) {
        return Err(ProjectionError::BodyMismatch);
    }

    Ok(record)
}

async fn fetch_as_commit(
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Commit, ProjectionError> {
    let record = source
        .fetch_pull_request(&config.owner, &config.repo, config.pr_number)
        .await?;
    Ok(record.into())
}

/// The earliest commit of the pull request: the last element, since input
/// order is most recent first.
fn first_commit(commits: &[Commit]) -> Option<&Commit> {
    commits.last()
}

/// Combine every commit into one body: `* subject`, a blank line, then the
/// commit's own body when it has one, items joined by blank lines. Rendered
/// oldest first, hence the reversal of the newest-first input.
fn fold_bodies(commits: &[Commit]) -> String {
    let mut items: Vec<String> = commits
        .iter()
        .map(|commit| {
            if commit.body.is_empty() {
                format!("* {}", commit.subject)
            } else {
                format!("* {}\n\n{}", commit.subject, commit.body)
            }
        })
        .collect();
    items.reverse();
    items.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{commit, test_config, MockSource};

    #[tokio::test]
    async fn test_github_keeps_a_lone_commit_without_fetching() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [commit("Commit title", "description")];

        let projected = project(Strategy::Github, &commits, &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "Commit title (#42)");
        assert_eq!(projected.body, "description");
        assert_eq!(projected.message, "Commit title (#42)\n\ndescription");
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_github_synthesizes_from_pull_request_over_folded_commits() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [
            commit("Commit title 2", "description 2"),
            commit("Commit title 1", "description 1"),
        ];

        let projected = project(Strategy::Github, &commits, &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "pr title (#42)");
        assert_eq!(
            projected.body,
            "* Commit title 1\n\ndescription 1\n\n* Commit title 2\n\ndescription 2"
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_github_fold_skips_empty_bodies() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [
            commit("Commit title 2", ""),
            commit("Commit title 1", "description 1"),
        ];

        let projected = project(Strategy::Github, &commits, &source, &test_config())
            .await
            .unwrap();

        assert_eq!(
            projected.body,
            "* Commit title 1\n\ndescription 1\n\n* Commit title 2"
        );
    }

    #[tokio::test]
    async fn test_github_with_no_commits_takes_the_pull_request_title() {
        let source = MockSource::returning("pr title", "pr body");

        let projected = project(Strategy::Github, &[], &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "pr title (#42)");
        assert_eq!(projected.body, "");
        assert_eq!(projected.message, "pr title (#42)");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_pull_request_returns_the_record_verbatim() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [
            commit("Unrelated subject", "unrelated body"),
            commit("Other subject", "other body"),
        ];

        let projected = project(Strategy::PullRequest, &commits, &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "pr title (#42)");
        assert_eq!(projected.body, "pr body");
        assert_eq!(projected.message, "pr title (#42)\n\npr body");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_pull_request_accepts_an_empty_commit_list() {
        let source = MockSource::returning("pr title", "pr body");

        let projected = project(Strategy::PullRequest, &[], &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "pr title (#42)");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_pull_request_match_returns_the_record() {
        let source = MockSource::returning("Commit title", "description");
        let commits = [commit("Commit title", "description")];

        let projected = project(
            Strategy::StrictPullRequest,
            &commits,
            &source,
            &test_config(),
        )
        .await
        .unwrap();

        assert_eq!(projected.subject, "Commit title (#42)");
        assert_eq!(projected.body, "description");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_pull_request_mismatch_fails() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [commit("Commit title", "description")];

        let err = project(
            Strategy::StrictPullRequest,
            &commits,
            &source,
            &test_config(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProjectionError::BodyMismatch));
        assert_eq!(
            err.to_string(),
            "The pull request description is not equal to the first commit body"
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_pull_request_rejects_matching_subject_with_different_body() {
        let source = MockSource::returning("Commit title", "pr body");
        let commits = [commit("Commit title", "description")];

        let err = project(
            Strategy::StrictPullRequest,
            &commits,
            &source,
            &test_config(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProjectionError::BodyMismatch));
    }

    #[tokio::test]
    async fn test_strict_strategies_refuse_empty_list_before_fetching() {
        for strategy in [Strategy::StrictGithub, Strategy::StrictPullRequest] {
            let source = MockSource::returning("pr title", "pr body");

            let err = project(strategy, &[], &source, &test_config())
                .await
                .unwrap_err();

            assert!(matches!(err, ProjectionError::NoCommits));
            assert_eq!(err.to_string(), "No commits found");
            assert_eq!(source.fetch_count(), 0, "strategy: {strategy}");
        }
    }

    #[tokio::test]
    async fn test_strict_github_match_keeps_a_lone_commit() {
        let source = MockSource::returning("Commit title", "pr body");
        let commits = [commit("Commit title", "description")];

        let projected = project(Strategy::StrictGithub, &commits, &source, &test_config())
            .await
            .unwrap();

        // The commit itself survives; only the title was checked against the record.
        assert_eq!(projected.subject, "Commit title (#42)");
        assert_eq!(projected.body, "description");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_github_checks_the_earliest_commit() {
        // Newest first: "Commit title 1" is the earliest commit of the pull
        // request, and the one the title must match.
        let source = MockSource::returning("Commit title 1", "pr body");
        let commits = [
            commit("Commit title 2", "description 2"),
            commit("Commit title 1", "description 1"),
        ];

        let projected = project(Strategy::StrictGithub, &commits, &source, &test_config())
            .await
            .unwrap();

        assert_eq!(projected.subject, "Commit title 1 (#42)");
        assert_eq!(
            projected.body,
            "* Commit title 1\n\ndescription 1\n\n* Commit title 2\n\ndescription 2"
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_github_rejects_title_matching_the_newest_commit() {
        let source = MockSource::returning("Commit title 2", "pr body");
        let commits = [
            commit("Commit title 2", "description 2"),
            commit("Commit title 1", "description 1"),
        ];

        let err = project(Strategy::StrictGithub, &commits, &source, &test_config())
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectionError::TitleMismatch));
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_strict_github_mismatch_fails_after_exactly_one_fetch() {
        let source = MockSource::returning("pr title", "pr body");
        let commits = [commit("Commit title", "description")];

        let err = project(Strategy::StrictGithub, &commits, &source, &test_config())
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectionError::TitleMismatch));
        assert_eq!(
            err.to_string(),
            "The pull request title is not equal to the first commit subject"
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_passes_through_unwrapped() {
        let source = MockSource::failing();

        let err = project(Strategy::PullRequest, &[], &source, &test_config())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProjectionError::Fetch(FetchError::Status { .. })
        ));
        assert_eq!(
            err.to_string(),
            "GitHub API returned 503 Service Unavailable for pull request #42"
        );
    }
}
