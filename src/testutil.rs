use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::commit::Commit;
use crate::config::Config;
use crate::pr::{FetchError, PullRequestRecord, PullRequestSource};

/// Canned [`PullRequestSource`] that counts how often it was asked.
pub(crate) struct MockSource {
    record: Option<PullRequestRecord>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Answers every fetch with the given title and body.
    pub(crate) fn returning(title: &str, body: &str) -> Self {
        MockSource {
            record: Some(PullRequestRecord::new(title, body)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every fetch with a 503.
    pub(crate) fn failing() -> Self {
        MockSource {
            record: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PullRequestSource for MockSource {
    async fn fetch_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<PullRequestRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.record {
            Some(record) => Ok(record.clone()),
            None => Err(FetchError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                number,
            }),
        }
    }
}

pub(crate) fn commit(subject: &str, body: &str) -> Commit {
    Commit::new(subject, body)
}

pub(crate) fn test_config() -> Config {
    Config {
        token: "test-token".to_string(),
        pr_number: 42,
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
    }
}
