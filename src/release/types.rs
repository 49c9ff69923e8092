use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::commit::Commit;

#[derive(Debug, Error)]
pub enum PluginConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Plugin settings loaded from .pr-release-analyzer.toml.
///
/// All fields are optional — the plugin works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig {
    /// Projection strategy name. Absent means "github".
    pub strategy: Option<String>,

    /// Settings forwarded untouched to the commit analysis step.
    #[serde(default)]
    pub commit_analyzer_config: Option<serde_json::Value>,

    /// Settings forwarded untouched to the notes generation step.
    #[serde(default)]
    pub notes_generator_config: Option<serde_json::Value>,
}

impl PluginConfig {
    /// Load plugin settings from .pr-release-analyzer.toml in the current
    /// directory. Returns the defaults if the file doesn't exist.
    pub fn load() -> Result<PluginConfig, PluginConfigError> {
        let path = Path::new(".pr-release-analyzer.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(PluginConfig::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<PluginConfig, PluginConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// What the release pipeline knows at the time a step runs.
#[derive(Debug, Clone, Default)]
pub struct ReleaseContext {
    /// Commits of the pull request under release, most recent first.
    pub commits: Vec<Commit>,

    /// Version the pipeline would publish, once computed.
    pub next_version: Option<String>,
}

impl ReleaseContext {
    pub fn new(commits: Vec<Commit>) -> ReleaseContext {
        ReleaseContext {
            commits,
            next_version: None,
        }
    }

    /// The same context narrowed to a single synthesized commit.
    pub fn with_commit(&self, commit: Commit) -> ReleaseContext {
        ReleaseContext {
            commits: vec![commit],
            next_version: self.next_version.clone(),
        }
    }
}

/// Kind of version bump a commit set warrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        };
        write!(f, "{}", name)
    }
}
