use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN is not set in the environment")]
    MissingToken,

    #[error("GITHUB_PR_NUMBER is not set in the environment")]
    MissingPrNumber,

    #[error("GITHUB_REPOSITORY is not set in the environment")]
    MissingRepository,

    #[error("GITHUB_PR_NUMBER is not a pull request number: {0}")]
    InvalidPrNumber(String),

    #[error("GITHUB_REPOSITORY is not in <owner>/<repo> form: {0}")]
    InvalidRepository(String),
}

/// Per-invocation GitHub binding, read from the environment the release
/// workflow runs in. Validated in full before any fetch is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    /// API token (`GITHUB_TOKEN`)
    pub token: String,
    /// Number of the pull request under analysis (`GITHUB_PR_NUMBER`)
    pub pr_number: u64,
    /// Repository owner, from the `<owner>/<repo>` slug (`GITHUB_REPOSITORY`)
    pub owner: String,
    /// Repository name, from the same slug
    pub repo: String,
}

impl Config {
    /// Read the binding from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the binding through an injected lookup. `from_env` is a thin
    /// wrapper; tests pass a closure over fixed pairs instead of mutating
    /// process-wide state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let token = present(lookup("GITHUB_TOKEN")).ok_or(ConfigError::MissingToken)?;

        let pr_number = present(lookup("GITHUB_PR_NUMBER")).ok_or(ConfigError::MissingPrNumber)?;
        let pr_number = pr_number
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPrNumber(pr_number.clone()))?;

        let repository = present(lookup("GITHUB_REPOSITORY")).ok_or(ConfigError::MissingRepository)?;
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => (owner, repo),
            _ => return Err(ConfigError::InvalidRepository(repository.clone())),
        };

        Ok(Config {
            token,
            pr_number,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

/// Empty counts as unset, matching how the workflow variables behave.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
