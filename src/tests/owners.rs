use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::async_trait;

use crate::github::GithubRepoName;
use crate::owners::{OwnersLoader, RepoOwners, ResolvedOwners};

/// `doc/README.md` is approved by `user-1` and `user-2` and reviewed by `user-1`, `user-3`,
/// `user-4` and `user-5`. No other file has any owners.
pub fn default_owners() -> TestOwners {
    TestOwners::default()
        .with_approvers("doc/README.md", &["user-1", "user-2"])
        .with_reviewers("doc/README.md", &["user-1", "user-3", "user-4", "user-5"])
}

#[derive(Clone, Default)]
pub struct TestOwners {
    approvers: HashMap<String, HashSet<String>>,
    reviewers: HashMap<String, HashSet<String>>,
    failing: bool,
    loaded_refs: Arc<Mutex<Vec<String>>>,
}

impl TestOwners {
    pub fn with_approvers(mut self, path: &str, users: &[&str]) -> Self {
        self.approvers
            .entry(path.to_string())
            .or_default()
            .extend(users.iter().map(|u| u.to_string()));
        self
    }

    pub fn with_reviewers(mut self, path: &str, users: &[&str]) -> Self {
        self.reviewers
            .entry(path.to_string())
            .or_default()
            .extend(users.iter().map(|u| u.to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Base branches for which OWNERS were requested.
    pub fn loaded_refs(&self) -> Vec<String> {
        self.loaded_refs.lock().unwrap().clone()
    }
}

impl RepoOwners for TestOwners {
    fn approvers(&self, path: &str) -> HashSet<String> {
        self.approvers.get(path).cloned().unwrap_or_default()
    }

    fn reviewers(&self, path: &str) -> HashSet<String> {
        self.reviewers.get(path).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl OwnersLoader for TestOwners {
    async fn load_repo_owners(
        &self,
        repo: &GithubRepoName,
        base_ref: &str,
    ) -> anyhow::Result<Box<dyn RepoOwners>> {
        self.loaded_refs.lock().unwrap().push(base_ref.to_string());
        if self.failing {
            return Err(anyhow::anyhow!("Cannot resolve OWNERS of {repo}"));
        }
        Ok(Box::new(ResolvedOwners::new(
            self.approvers.clone(),
            self.reviewers.clone(),
        )))
    }
}
