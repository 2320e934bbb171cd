use anyhow::Context;
use axum::async_trait;
use url::Url;

use crate::github::GithubRepoName;
use crate::owners::{OwnersLoader, RepoOwners, ResolvedOwners};

/// Loads OWNERS snapshots from the HTTP API of an OWNERS resolution service.
///
/// `GET {base_url}/v1/owners/{owner}/{repo}/{base_ref}` is expected to return
/// `{"approvers": {"<path>": ["<login>"]}, "reviewers": {"<path>": ["<login>"]}}`.
pub struct OwnersApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl OwnersApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn owners_url(&self, repo: &GithubRepoName, base_ref: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Invalid OWNERS service URL {}", self.base_url))?
            .pop_if_empty()
            .extend(["v1", "owners", repo.owner(), repo.name(), base_ref]);
        Ok(url)
    }
}

#[async_trait]
impl OwnersLoader for OwnersApiClient {
    async fn load_repo_owners(
        &self,
        repo: &GithubRepoName,
        base_ref: &str,
    ) -> anyhow::Result<Box<dyn RepoOwners>> {
        tracing::debug!("Loading OWNERS for repository {repo} at {base_ref}");

        let url = self.owners_url(repo, base_ref)?;
        let owners = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Cannot load OWNERS of {repo} from OWNERS service"))?
            .error_for_status()?
            .json::<ResolvedOwners>()
            .await
            .with_context(|| format!("Cannot deserialize OWNERS of {repo}"))?;
        Ok(Box::new(owners))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::OwnersApiClient;
    use crate::github::GithubRepoName;
    use crate::owners::OwnersLoader;

    fn repo() -> GithubRepoName {
        GithubRepoName::new("kubernetes", "kubernetes")
    }

    fn client(server: &MockServer) -> OwnersApiClient {
        OwnersApiClient::new(server.uri().parse().unwrap())
    }

    #[tokio::test]
    async fn load_owners() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/owners/kubernetes/kubernetes/master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "approvers": { "doc/README.md": ["user-1", "user-2"] },
                "reviewers": { "doc/README.md": ["user-3"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let owners = client(&server)
            .load_repo_owners(&repo(), "master")
            .await
            .unwrap();
        assert!(owners.approvers("doc/README.md").contains("user-2"));
        assert!(owners.reviewers("doc/README.md").contains("user-3"));
        assert!(owners.approvers("random-path/README.md").is_empty());
    }

    #[tokio::test]
    async fn escape_base_ref() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/owners/kubernetes/kubernetes/release%2F1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let owners = client(&server)
            .load_repo_owners(&repo(), "release/1.0")
            .await
            .unwrap();
        assert!(owners.approvers("doc/README.md").is_empty());
    }

    #[tokio::test]
    async fn service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client(&server)
            .load_repo_owners(&repo(), "master")
            .await
            .is_err());
    }
}
