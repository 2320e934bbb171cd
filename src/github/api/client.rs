use anyhow::Context;
use axum::async_trait;
use octocrab::Octocrab;

use crate::community::RepositoryClient;
use crate::github::{GithubRepoName, PullRequestNumber};

/// Provides access to a single app installation (repository) using the GitHub API.
pub struct GithubRepositoryClient {
    /// The client caches the access token for this given repository and refreshes it once it
    /// expires.
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    fn format_pr(&self, pr: PullRequestNumber) -> String {
        format!("{}/{}/{}", self.repo_name.owner(), self.repo_name.name(), pr)
    }
}

#[async_trait]
impl RepositoryClient for GithubRepositoryClient {
    fn repository(&self) -> &GithubRepoName {
        &self.repo_name
    }

    async fn list_changed_files(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<String>> {
        // https://docs.github.com/en/rest/pulls/pulls#list-pull-requests-files
        let page = self
            .client
            .pulls(self.repo_name.owner(), self.repo_name.name())
            .list_files(pr.0)
            .await
            .with_context(|| format!("Cannot get changed files of {}", self.format_pr(pr)))?;
        let files = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot get changed files of {}", self.format_pr(pr)))?;
        Ok(files.into_iter().map(|file| file.filename).collect())
    }

    async fn get_labels(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<String>> {
        let page = self
            .client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .list_labels_for_issue(pr.0)
            .per_page(100)
            .send()
            .await
            .with_context(|| format!("Cannot get labels of {}", self.format_pr(pr)))?;
        let labels = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot get labels of {}", self.format_pr(pr)))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn add_label(&self, pr: PullRequestNumber, label: &str) -> anyhow::Result<()> {
        self.client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .add_labels(pr.0, &[label.to_string()])
            .await
            .with_context(|| format!("Cannot add label {label} to {}", self.format_pr(pr)))?;
        Ok(())
    }
}
