//! Labels pull requests whose author is not an approver or reviewer of any of the changed files.
use axum::async_trait;
use octocrab::models::InstallationId;

use crate::github::{GithubRepoName, PullRequestNumber};
use crate::owners::OwnersLoader;

mod error;
pub mod event;
mod labels;
mod reviewers;

pub use error::{ReconcileError, ReconcileStep};
pub use event::PullRequestEvent;
pub use labels::reconcile_label;
pub use reviewers::{is_authorized, load_reviewers, normalize_login};

pub const HANDLER_NAME: &str = "community";

/// Label applied to pull requests authored by someone outside of the OWNERS files.
pub const COMMUNITY_CONTRIBUTION_LABEL: &str = "community-contribution";

pub fn help_text() -> String {
    format!(
        "The {HANDLER_NAME} handler automatically applies the '{COMMUNITY_CONTRIBUTION_LABEL}' \
label to PRs where the author is not in the OWNERS file(s)."
    )
}

/// Provides functionality for working with pull requests of a remote repository.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    fn repository(&self) -> &GithubRepoName;

    /// Return the paths of all files changed by the given pull request.
    async fn list_changed_files(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<String>>;

    /// Return the names of all labels currently attached to the pull request.
    async fn get_labels(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<String>>;

    /// Attach a label to the pull request.
    async fn add_label(&self, pr: PullRequestNumber, label: &str) -> anyhow::Result<()>;
}

/// Creates clients for repositories that have sent an event.
pub trait RepositoryLoader: Send + Sync {
    fn load_repository(
        &self,
        repo: &GithubRepoName,
        installation: Option<InstallationId>,
    ) -> anyhow::Result<Box<dyn RepositoryClient>>;
}

/// What happened to a pull request after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelOutcome {
    /// The action of the event does not require a re-evaluation.
    Ignored,
    /// The author owns at least one of the changed files.
    Authorized,
    AlreadyLabeled,
    LabelAdded,
}

/// Handles a single pull request event.
///
/// The OWNERS data of the base branch is loaded first, then the changed files of the PR are
/// resolved against it. If the sender is not an approver or reviewer of any changed file,
/// the [`COMMUNITY_CONTRIBUTION_LABEL`] is added to the PR.
pub async fn handle_pull_request(
    client: &dyn RepositoryClient,
    owners: &dyn OwnersLoader,
    event: &PullRequestEvent,
) -> Result<LabelOutcome, ReconcileError> {
    if !event.is_relevant() {
        tracing::trace!("Ignoring pull request action {}", event.action);
        return Ok(LabelOutcome::Ignored);
    }

    let repo = &event.repository;
    let pr = event.pr_number;
    let error = |step: ReconcileStep| {
        move |source: anyhow::Error| ReconcileError::new(step, repo.clone(), pr, source)
    };

    let repo_owners = owners
        .load_repo_owners(repo, &event.base_ref)
        .await
        .map_err(error(ReconcileStep::LoadOwners))?;
    tracing::debug!("Loaded OWNERS of {repo} at {}", event.base_ref);

    let files = client
        .list_changed_files(pr)
        .await
        .map_err(error(ReconcileStep::ListChangedFiles))?;
    let reviewers = load_reviewers(repo_owners.as_ref(), &files);
    tracing::debug!(
        "Resolved {} reviewer(s) for {} changed file(s)",
        reviewers.len(),
        files.len()
    );

    let authorized = is_authorized(&event.sender.login, &reviewers);
    tracing::debug!(
        "User {} is {}an owner of the changed files",
        event.sender.login,
        if authorized { "" } else { "not " }
    );

    reconcile_label(client, pr, authorized, COMMUNITY_CONTRIBUTION_LABEL).await
}
