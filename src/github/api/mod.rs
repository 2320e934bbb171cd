use anyhow::Context;
use octocrab::models::{AppId, InstallationId};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretVec};

use client::GithubRepositoryClient;

use crate::community::{RepositoryClient, RepositoryLoader};
use crate::github::GithubRepoName;

pub mod client;

fn base_github_url() -> &'static str {
    "https://api.github.com"
}

/// Creates an Octocrab client authenticated as the GitHub App with the given ID.
pub fn create_github_client(
    app_id: AppId,
    github_url: String,
    private_key: SecretVec<u8>,
) -> anyhow::Result<Octocrab> {
    let key = jsonwebtoken::EncodingKey::from_rsa_pem(private_key.expose_secret().as_ref())
        .context("Could not encode private key")?;

    Octocrab::builder()
        .base_uri(github_url)
        .context("Invalid GitHub URL")?
        .app(app_id, key)
        .build()
        .context("Could not create octocrab builder")
}

/// Provides access to repositories where the bot's GitHub App is installed.
pub struct GithubAppClient {
    client: Octocrab,
}

impl GithubAppClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    pub fn load(app_id: AppId, private_key: SecretVec<u8>) -> anyhow::Result<Self> {
        let client = create_github_client(app_id, base_github_url().to_string(), private_key)?;
        Ok(Self::new(client))
    }
}

impl RepositoryLoader for GithubAppClient {
    fn load_repository(
        &self,
        repo: &GithubRepoName,
        installation: Option<InstallationId>,
    ) -> anyhow::Result<Box<dyn RepositoryClient>> {
        let Some(installation) = installation else {
            return Err(anyhow::anyhow!(
                "Event from {repo} was not delivered by a GitHub App installation"
            ));
        };
        Ok(Box::new(GithubRepositoryClient::new(
            self.client.installation(installation),
            repo.clone(),
        )))
    }
}
