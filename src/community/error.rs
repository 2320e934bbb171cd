use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::github::{GithubRepoName, PullRequestNumber};

/// External call performed while handling a single pull request event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileStep {
    LoadOwners,
    ListChangedFiles,
    ListLabels,
    AddLabel,
}

impl Display for ReconcileStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileStep::LoadOwners => f.write_str("load OWNERS"),
            ReconcileStep::ListChangedFiles => f.write_str("list changed files"),
            ReconcileStep::ListLabels => f.write_str("list labels"),
            ReconcileStep::AddLabel => f.write_str("add label"),
        }
    }
}

/// Any failure of an external collaborator aborts the whole invocation.
/// The pull request is left in the state it had before the event.
#[derive(Error, Debug)]
#[error("Cannot {step} for {repository}#{pr}")]
pub struct ReconcileError {
    pub step: ReconcileStep,
    pub repository: GithubRepoName,
    pub pr: PullRequestNumber,
    #[source]
    source: anyhow::Error,
}

impl ReconcileError {
    pub fn new(
        step: ReconcileStep,
        repository: GithubRepoName,
        pr: PullRequestNumber,
        source: anyhow::Error,
    ) -> Self {
        Self {
            step,
            repository,
            pr,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReconcileError, ReconcileStep};
    use crate::github::{GithubRepoName, PullRequestNumber};

    #[test]
    fn error_message_contains_step_and_pr() {
        let error = ReconcileError::new(
            ReconcileStep::ListChangedFiles,
            GithubRepoName::new("kubernetes", "kubernetes"),
            PullRequestNumber(101),
            anyhow::anyhow!("rate limited"),
        );
        insta::assert_snapshot!(
            error.to_string(),
            @"Cannot list changed files for kubernetes/kubernetes#101"
        );
        let source = std::error::Error::source(&error).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("rate limited"));
    }
}
