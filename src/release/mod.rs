pub mod types;

pub use types::{PluginConfig, PluginConfigError, ReleaseContext, ReleaseType};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::pr::PullRequestSource;
use crate::projection::{project, ProjectionError};
use crate::strategy::{Strategy, StrategyError};

/// Opaque error handed back by a downstream step.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("Commit analysis failed: {0}")]
    Analysis(#[source] BoxError),

    #[error("Release notes generation failed: {0}")]
    Notes(#[source] BoxError),
}

/// Downstream step that decides the release type from a commit set.
///
/// Implementations wrap whatever commit-message convention the pipeline
/// follows; by the time they run, `context.commits` holds exactly the one
/// synthesized commit.
#[async_trait]
pub trait CommitAnalyzer: Send + Sync {
    async fn analyze_commits(
        &self,
        strategy: &str,
        config: Option<&serde_json::Value>,
        context: &ReleaseContext,
    ) -> Result<Option<ReleaseType>, BoxError>;
}

/// Downstream step that renders release notes from a commit set.
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    async fn generate_notes(
        &self,
        strategy: &str,
        config: Option<&serde_json::Value>,
        context: &ReleaseContext,
    ) -> Result<String, BoxError>;
}

/// Run the commit-analysis step: synthesize the release commit for the pull
/// request, then hand a context narrowed to that commit over to `analyzer`.
pub async fn analyze_commits(
    plugin: &PluginConfig,
    context: &ReleaseContext,
    analyzer: &dyn CommitAnalyzer,
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<Option<ReleaseType>, ReleaseError> {
    let (strategy, narrowed) = prepare(plugin, context, source, config).await?;

    let release_type = analyzer
        .analyze_commits(
            strategy.name(),
            plugin.commit_analyzer_config.as_ref(),
            &narrowed,
        )
        .await
        .map_err(ReleaseError::Analysis)?;

    info!(release_type = ?release_type, "commit analysis complete");
    Ok(release_type)
}

/// Run the notes-generation step over the same synthesized commit.
pub async fn generate_notes(
    plugin: &PluginConfig,
    context: &ReleaseContext,
    generator: &dyn NotesGenerator,
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<String, ReleaseError> {
    let (strategy, narrowed) = prepare(plugin, context, source, config).await?;

    let notes = generator
        .generate_notes(
            strategy.name(),
            plugin.notes_generator_config.as_ref(),
            &narrowed,
        )
        .await
        .map_err(ReleaseError::Notes)?;

    info!(bytes = notes.len(), "release notes generated");
    Ok(notes)
}

/// Shared front half of both steps: resolve the strategy, project the commit,
/// narrow the context to it. Each step projects on its own; nothing is cached
/// between invocations.
async fn prepare(
    plugin: &PluginConfig,
    context: &ReleaseContext,
    source: &dyn PullRequestSource,
    config: &Config,
) -> Result<(Strategy, ReleaseContext), ReleaseError> {
    let strategy = Strategy::resolve(plugin.strategy.as_deref())?;
    let commit = project(strategy, &context.commits, source, config).await?;
    debug!(strategy = %strategy, subject = %commit.subject, "projected release commit");
    Ok((strategy, context.with_commit(commit)))
}
