use std::path::Path;

use anyhow::Context;

use crate::github::GithubRepoName;

/// Configuration of the bot loaded from a TOML file passed on the command line.
///
/// ```toml
/// # Organizations (`org`) or single repositories (`org/repo`) where PRs are labeled.
/// repositories = ["kubernetes", "kubernetes-sigs/kind"]
/// ```
#[derive(serde::Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// When empty, the bot handles events of all repositories.
    #[serde(default)]
    repositories: Vec<String>,
}

impl BotConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read configuration file {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Cannot parse bot configuration")
    }

    pub fn is_enabled_for(&self, repo: &GithubRepoName) -> bool {
        if self.repositories.is_empty() {
            return true;
        }
        self.repositories.iter().any(|entry| {
            let entry = entry.to_lowercase();
            match entry.split_once('/') {
                Some((owner, name)) => owner == repo.owner() && name == repo.name(),
                None => entry == repo.owner(),
            }
        })
    }
}
