use crate::github::{GithubRepoName, GithubUser, PullRequestAction, PullRequestNumber};

/// A `pull_request` webhook delivery, reduced to what the community handler needs.
#[derive(Clone, Debug)]
pub struct PullRequestEvent {
    /// Repository the pull request is targeting.
    pub repository: GithubRepoName,
    /// GitHub App installation that delivered the webhook.
    pub installation: Option<u64>,
    pub pr_number: PullRequestNumber,
    /// Name of the branch the pull request is targeting.
    pub base_ref: String,
    pub action: PullRequestAction,
    /// The user that triggered the event.
    pub sender: GithubUser,
}

impl PullRequestEvent {
    /// Only new or updated pull requests are re-evaluated.
    pub fn is_relevant(&self) -> bool {
        matches!(
            self.action,
            PullRequestAction::Opened | PullRequestAction::Reopened | PullRequestAction::Synchronize
        )
    }
}
