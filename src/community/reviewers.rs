use std::collections::HashSet;

use crate::owners::RepoOwners;

/// Returns all reviewers and approvers from all OWNERS files that cover the provided
/// file paths. An empty list of paths yields an empty set.
pub fn load_reviewers(owners: &dyn RepoOwners, paths: &[String]) -> HashSet<String> {
    let mut reviewers = HashSet::new();
    for path in paths {
        reviewers.extend(
            owners
                .approvers(path)
                .into_iter()
                .chain(owners.reviewers(path))
                .map(|login| normalize_login(&login)),
        );
    }
    reviewers
}

/// Is the given user an approver or reviewer of at least one of the changed files?
pub fn is_authorized(login: &str, reviewers: &HashSet<String>) -> bool {
    reviewers.contains(&normalize_login(login))
}

/// GitHub logins are case-insensitive and OWNERS files sometimes mention users as `@login`.
pub fn normalize_login(login: &str) -> String {
    login.trim().trim_start_matches('@').to_lowercase()
}
