//! PR Release Analyzer - Release commits for squash-merged pull requests
//!
//! Derives the single commit a release pipeline should analyze for a GitHub
//! pull request, folding the pull request's own commits and metadata into one
//! synthesized commit message.
//!
//! This library provides:
//! - [`commit`]: The commit representation and its message layout
//! - [`config`]: GitHub settings read from the CI environment
//! - [`pr`]: Pull request metadata fetching
//! - [`projection`]: Per-strategy synthesis of the release commit
//! - [`release`]: Entry points for the release pipeline steps
//! - [`strategy`]: Strategy names and resolution

pub mod commit;
pub mod config;
pub mod pr;
pub mod projection;
pub mod release;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testutil;
