//! Access to OWNERS data resolved by an external service.
//!
//! The bot does not walk OWNERS files itself. It asks the service for a snapshot of the
//! approvers and reviewers of a repository at a given base branch, and then only performs
//! lookups in that snapshot.
use std::collections::{HashMap, HashSet};

use axum::async_trait;

use crate::github::GithubRepoName;

mod client;

pub use client::OwnersApiClient;

/// Approvers and reviewers of the files of a repository at a specific base branch.
pub trait RepoOwners: Send + Sync {
    /// Users that can approve changes to the given file.
    fn approvers(&self, path: &str) -> HashSet<String>;

    /// Users that can review changes to the given file.
    fn reviewers(&self, path: &str) -> HashSet<String>;
}

/// Loads a fresh OWNERS snapshot for every handled event.
#[async_trait]
pub trait OwnersLoader: Send + Sync {
    async fn load_repo_owners(
        &self,
        repo: &GithubRepoName,
        base_ref: &str,
    ) -> anyhow::Result<Box<dyn RepoOwners>>;
}

/// OWNERS snapshot where the hierarchy was already resolved into per-file sets.
/// Files that are not mentioned have no approvers and no reviewers.
#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ResolvedOwners {
    #[serde(default)]
    approvers: HashMap<String, HashSet<String>>,
    #[serde(default)]
    reviewers: HashMap<String, HashSet<String>>,
}

impl ResolvedOwners {
    pub fn new(
        approvers: HashMap<String, HashSet<String>>,
        reviewers: HashMap<String, HashSet<String>>,
    ) -> Self {
        Self {
            approvers,
            reviewers,
        }
    }
}

impl RepoOwners for ResolvedOwners {
    fn approvers(&self, path: &str) -> HashSet<String> {
        self.approvers.get(path).cloned().unwrap_or_default()
    }

    fn reviewers(&self, path: &str) -> HashSet<String> {
        self.reviewers.get(path).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoOwners, ResolvedOwners};

    #[test]
    fn parse_snapshot() {
        let owners: ResolvedOwners = serde_json::from_str(
            r#"{
                "approvers": { "doc/README.md": ["user-1", "user-2"] },
                "reviewers": { "doc/README.md": ["user-3"], "Makefile": ["user-4"] }
            }"#,
        )
        .unwrap();
        assert_eq!(owners.approvers("doc/README.md").len(), 2);
        assert!(owners.approvers("Makefile").is_empty());
        assert!(owners.reviewers("Makefile").contains("user-4"));
    }

    #[test]
    fn parse_empty_snapshot() {
        let owners: ResolvedOwners = serde_json::from_str("{}").unwrap();
        assert_eq!(owners, ResolvedOwners::default());
        assert!(owners.reviewers("doc/README.md").is_empty());
    }
}
