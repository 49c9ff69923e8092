use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use pr_release_analyzer::commit::Commit;
use pr_release_analyzer::config::Config;
use pr_release_analyzer::pr::GithubClient;
use pr_release_analyzer::projection::project;
use pr_release_analyzer::release::PluginConfig;
use pr_release_analyzer::strategy::Strategy;

/// PR Release Analyzer — previews the commit a release pipeline would analyze
/// for the pull request described by the CI environment (GITHUB_TOKEN,
/// GITHUB_REPOSITORY, GITHUB_PR_NUMBER).
#[derive(Parser, Debug)]
#[command(name = "pr-release-analyzer", version, about)]
struct Cli {
    /// Projection strategy: github, strict-github, pull-request,
    /// or strict-pull-request.
    ///
    /// Overrides the config file; defaults to github.
    #[arg(short, long)]
    strategy: Option<String>,

    /// Plugin config file path (defaults to .pr-release-analyzer.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Optional output file path for the raw commit message
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading plugin configuration");
    let plugin = match cli.config.as_deref() {
        Some(path) => PluginConfig::load_from(path)?,
        None => PluginConfig::load()?,
    };

    let requested = cli.strategy.or(plugin.strategy);
    let strategy = Strategy::resolve(requested.as_deref())?;

    info!("loading GitHub settings from the environment");
    let config = Config::from_env()?;

    let _main_span = info_span!(
        "pr_release_preview",
        owner = %config.owner,
        repo = %config.repo,
        pr = config.pr_number
    )
    .entered();

    let client = GithubClient::new(&config.token);

    info!("fetching pull request commits from GitHub");
    let commits = client
        .list_commits(&config.owner, &config.repo, config.pr_number)
        .await?;
    debug!(commits = commits.len(), "fetched commit list");

    info!(strategy = %strategy, "projecting release commit");
    let commit = project(strategy, &commits, &client, &config).await?;
    info!(subject = %commit.subject, "done");

    match cli.output.as_deref() {
        Some(path) => {
            debug!(path = %path.display(), "writing commit message to file");
            std::fs::write(path, &commit.message)?;
        }
        None => print_preview(&config, strategy, commits.len(), &commit),
    }

    Ok(())
}

/// Format and print the projected commit to the terminal with colors.
fn print_preview(config: &Config, strategy: Strategy, commit_count: usize, commit: &Commit) {
    println!();
    println!(
        "PR #{} in {}/{}",
        config.pr_number, config.owner, config.repo
    );
    println!("Strategy: {} | Commits: {}", strategy, commit_count);
    println!();

    println!("═══ Subject ═══");
    println!("{}", commit.subject.green().bold());
    println!();

    println!("═══ Body ═══");
    if commit.body.is_empty() {
        println!("(empty)");
    } else {
        println!("{}", commit.body);
    }
    println!();
}
