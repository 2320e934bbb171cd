use crate::community::error::{ReconcileError, ReconcileStep};
use crate::community::{LabelOutcome, RepositoryClient};
use crate::github::PullRequestNumber;

/// Makes sure that `label` is attached to the PR if its author is not authorized.
///
/// The label is only ever added. If the author turns out to be authorized (for example because
/// the OWNERS files were changed after the label has been applied), an existing label is kept.
pub async fn reconcile_label(
    client: &dyn RepositoryClient,
    pr: PullRequestNumber,
    authorized: bool,
    label: &str,
) -> Result<LabelOutcome, ReconcileError> {
    if authorized {
        tracing::debug!("Author is an owner of the changed files, not labeling PR {pr}");
        return Ok(LabelOutcome::Authorized);
    }

    let error = |step: ReconcileStep| {
        let repository = client.repository().clone();
        move |source: anyhow::Error| ReconcileError::new(step, repository, pr, source)
    };

    let labels = client
        .get_labels(pr)
        .await
        .map_err(error(ReconcileStep::ListLabels))?;

    // Adding a label that is already present must not happen, GitHub label names
    // are case-insensitive.
    if labels.iter().any(|l| l.eq_ignore_ascii_case(label)) {
        tracing::debug!("PR {pr} already has label {label}");
        return Ok(LabelOutcome::AlreadyLabeled);
    }

    tracing::info!("Adding label {label} to PR {pr}");
    client
        .add_label(pr, label)
        .await
        .map_err(error(ReconcileStep::AddLabel))?;
    Ok(LabelOutcome::LabelAdded)
}
