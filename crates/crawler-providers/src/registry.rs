use crate::github::GitHubCrawler;
use crate::gitlab::GitLabCrawler;
use crawler_core::model::ProviderKind;
use crawler_core::provider::ProviderClient;

pub struct ProviderRegistry;

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn client(
        &self,
        kind: ProviderKind,
        token: String,
        base_url: Option<&str>,
    ) -> anyhow::Result<Box<dyn ProviderClient>> {
        match kind {
            ProviderKind::GitHub => Ok(Box::new(GitHubCrawler::new(token, base_url)?)),
            ProviderKind::GitLab => Ok(Box::new(GitLabCrawler::new(token, base_url)?)),
        }
    }
}
