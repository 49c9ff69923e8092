use crate::commit::Commit;

/// Title/description metadata for exactly one pull request, fetched fresh on
/// every invocation that needs it. Independent of the commit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Pull request title
    pub title: String,
    /// Pull request description; the API reports no description as null,
    /// normalized here to empty
    pub body: String,
}

impl PullRequestRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> PullRequestRecord {
        PullRequestRecord {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// The record imitated as a commit: title becomes the subject, description
/// the body.
impl From<PullRequestRecord> for Commit {
    fn from(record: PullRequestRecord) -> Commit {
        Commit::new(record.title, record.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_imitates_commit() {
        let commit: Commit = PullRequestRecord::new("pr title", "pr body").into();
        assert_eq!(commit.subject, "pr title");
        assert_eq!(commit.body, "pr body");
        assert_eq!(commit.message, "pr title\n\npr body");
    }

    #[test]
    fn test_record_without_body_imitates_bare_commit() {
        let commit: Commit = PullRequestRecord::new("pr title", "").into();
        assert_eq!(commit.message, "pr title");
    }
}
