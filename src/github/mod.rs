//! Contains definitions of common types (repository name, user, pull request number)
//! needed for working with GitHub repositories.
use std::fmt::{Debug, Display, Formatter};

pub mod api;
pub mod server;
mod webhook;

pub use api::client::GithubRepositoryClient;
pub use api::GithubAppClient;
pub use webhook::WebhookSecret;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// The user that triggered a webhook event.
#[derive(Debug, PartialEq, Clone)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PullRequestNumber(pub u64);

impl From<u64> for PullRequestNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for PullRequestNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

/// The `action` field of a `pull_request` webhook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PullRequestAction {
    Opened,
    Reopened,
    /// New commits were pushed to the head branch.
    Synchronize,
    Other(String),
}

impl From<&str> for PullRequestAction {
    fn from(value: &str) -> Self {
        match value {
            "opened" => Self::Opened,
            "reopened" => Self::Reopened,
            "synchronize" => Self::Synchronize,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for PullRequestAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PullRequestAction::Opened => f.write_str("opened"),
            PullRequestAction::Reopened => f.write_str("reopened"),
            PullRequestAction::Synchronize => f.write_str("synchronize"),
            PullRequestAction::Other(action) => f.write_str(action),
        }
    }
}
