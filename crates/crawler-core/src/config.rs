use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOKEN_ENV: &str = "GIT_TOKEN";
pub const DEFAULT_OUTPUT: &str = "repocrawler.json";

/// Everything the engine needs for one provider crawl. Built by the CLI
/// from flags and the optional config file; no process-global state.
#[derive(Clone, Debug)]
pub struct CrawlConfig {
    /// Scope the crawl to one organization/group; `None` discovers all
    /// organizations visible to the credential.
    pub organization: Option<String>,
    pub output: PathBuf,
    /// API base URL of a self-hosted instance.
    pub base_url: Option<String>,
    /// Name of the environment variable holding the access token.
    pub token_env: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            organization: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_url: None,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl CrawlConfig {
    /// Reads the credential. An empty or unset variable is a fatal
    /// precondition, reported before any network call is made.
    pub fn resolve_token(&self) -> anyhow::Result<String> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    fn resolve_token_with<F>(&self, lookup: F) -> anyhow::Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(&self.token_env).unwrap_or_default();
        if token.is_empty() {
            anyhow::bail!(
                "{} is empty, set it to a provider access token",
                self.token_env
            );
        }
        Ok(token)
    }
}

/// Optional JSON config file; CLI flags take precedence over its values.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub organization: Option<String>,
    pub output: Option<PathBuf>,
    pub scm_url: Option<String>,
    pub token_name: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).context("read config")?;
        let config = serde_json::from_str(&data).context("parse config")?;
        Ok(config)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let project =
        ProjectDirs::from("com", "repo-crawler", "repo-crawler").context("resolve project dirs")?;
    Ok(project.config_dir().join("config.json"))
}
