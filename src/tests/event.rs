use derive_builder::Builder;

use crate::community::PullRequestEvent;
use crate::github::{GithubRepoName, GithubUser, PullRequestAction};

pub fn default_repo_name() -> GithubRepoName {
    GithubRepoName::new("kubernetes", "kubernetes")
}

pub fn default_pr_number() -> u64 {
    101
}

#[derive(Builder)]
#[builder(pattern = "owned", setter(into))]
pub struct PullRequest {
    #[builder(default = "default_repo_name()")]
    repo: GithubRepoName,
    #[builder(default = "default_pr_number()")]
    number: u64,
    #[builder(default = "\"master\".to_string()")]
    base_ref: String,
    #[builder(default = "PullRequestAction::Opened")]
    action: PullRequestAction,
    sender: String,
    #[builder(default = "Some(1)")]
    installation: Option<u64>,
}

impl PullRequestBuilder {
    pub fn create(self) -> PullRequestEvent {
        let PullRequest {
            repo,
            number,
            base_ref,
            action,
            sender,
            installation,
        } = self.build().unwrap();
        PullRequestEvent {
            repository: repo,
            installation,
            pr_number: number.into(),
            base_ref,
            action,
            sender: GithubUser { login: sender },
        }
    }
}

/// An `opened` pull request event sent by the given user.
pub fn pull_request(sender: &str) -> PullRequestBuilder {
    PullRequestBuilder::default().sender(sender)
}
