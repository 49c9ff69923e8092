use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid strategy: {0}. Available options: {options}", options = Strategy::names())]
    Invalid(String),
}

/// How a pull request's own title/description and its commit list are
/// reconciled into one commit.
///
/// The set is closed: dispatch over it is exhaustive, so an unrecognized name
/// can only be rejected here, at the string boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Trust a lone commit as-is; otherwise synthesize from the pull request
    /// title plus every commit, the way GitHub builds a squash-merge message
    Github,
    /// Like `Github`, but the pull request title must equal the first
    /// commit's subject
    StrictGithub,
    /// Always take the pull request title/description, ignoring the commits
    PullRequest,
    /// Take the pull request title/description only if it equals the first
    /// commit's subject and body
    StrictPullRequest,
}

impl Strategy {
    /// Every supported strategy, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Github,
        Strategy::StrictGithub,
        Strategy::PullRequest,
        Strategy::StrictPullRequest,
    ];

    /// The configuration name of this strategy.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Github => "github",
            Strategy::StrictGithub => "strict-github",
            Strategy::PullRequest => "pull-request",
            Strategy::StrictPullRequest => "strict-pull-request",
        }
    }

    fn names() -> String {
        Self::ALL.map(Strategy::name).join(", ")
    }

    /// Resolve a requested strategy name. Absent or empty requests fall back
    /// on the default `github` strategy; anything unrecognized is rejected
    /// with the list of valid options.
    pub fn resolve(requested: Option<&str>) -> Result<Strategy, StrategyError> {
        match requested {
            None => Ok(Strategy::Github),
            Some("") => Ok(Strategy::Github),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Strategy::Github),
            "strict-github" => Ok(Strategy::StrictGithub),
            "pull-request" => Ok(Strategy::PullRequest),
            "strict-pull-request" => Ok(Strategy::StrictPullRequest),
            other => Err(StrategyError::Invalid(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
