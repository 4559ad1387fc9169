use crate::github_models::{OrgItem, RepoItem};
use crate::http::{ensure_success, github_rate_limited, send};
use crate::provider_paging::{next_page_from_link_header, page_number};
use anyhow::Context;
use crawler_core::model::{OrgRef, ProviderKind, RawRepo};
use crawler_core::paging::Page;
use crawler_core::provider::ProviderClient;
use reqwest::blocking::{Client, Response};
use tracing::debug;

const DEFAULT_HOST: &str = "https://api.github.com";
const USER_AGENT: &str = "repo-crawler";
const LIST_PAGE_SIZE: u32 = 10;
const DETAIL_PAGE_SIZE: u32 = 100;

pub struct GitHubCrawler {
    client: Client,
    host: String,
    token: String,
}

impl GitHubCrawler {
    pub fn new(token: String, base_url: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(),
            host: base_url
                .unwrap_or(DEFAULT_HOST)
                .trim_end_matches('/')
                .to_string(),
            token,
        })
    }

    fn get(&self, url: String) -> anyhow::Result<Response> {
        let builder = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(self.token.as_str());
        ensure_success(send(builder)?, github_rate_limited)
    }
}

impl ProviderClient for GitHubCrawler {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn list_organizations(&self, page_token: Option<&str>) -> anyhow::Result<Page<OrgRef>> {
        let page = page_number(page_token)?;
        debug!(page, "listing GitHub organizations");
        let url = format!(
            "{}/user/orgs?per_page={LIST_PAGE_SIZE}&page={page}",
            self.host
        );
        let response = self.get(url).context("call GitHub list organizations")?;
        let next = next_page_from_link_header(response.headers());
        let payload: Vec<OrgItem> = response.json().context("decode organizations response")?;
        Ok(Page {
            items: payload
                .into_iter()
                .map(|org| OrgRef { name: org.login })
                .collect(),
            next,
        })
    }

    fn list_repositories(
        &self,
        org: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<RawRepo>> {
        let page = page_number(page_token)?;
        debug!(org, page, "listing GitHub repositories");
        let url = format!(
            "{}/orgs/{org}/repos?per_page={LIST_PAGE_SIZE}&page={page}",
            self.host
        );
        let response = self.get(url).context("call GitHub list repositories")?;
        let next = next_page_from_link_header(response.headers());
        let payload: Vec<RepoItem> = response.json().context("decode repositories response")?;
        Ok(Page {
            items: payload.into_iter().map(RepoItem::into_raw).collect(),
            next,
        })
    }

    fn list_commits(
        &self,
        org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        let page = page_number(page_token)?;
        let url = format!(
            "{}/repos/{org}/{}/commits?per_page={DETAIL_PAGE_SIZE}&page={page}",
            self.host, repo.name
        );
        let response = self.get(url).context("call GitHub list commits")?;
        let next = next_page_from_link_header(response.headers());
        // Commit bodies are discarded; only the page count matters.
        let payload: Vec<serde_json::Value> =
            response.json().context("decode commits response")?;
        Ok(Page {
            items: vec![(); payload.len()],
            next,
        })
    }

    fn list_collaborators(
        &self,
        org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        let page = page_number(page_token)?;
        let url = format!(
            "{}/repos/{org}/{}/collaborators?per_page={DETAIL_PAGE_SIZE}&page={page}",
            self.host, repo.name
        );
        let response = self.get(url).context("call GitHub list collaborators")?;
        let next = next_page_from_link_header(response.headers());
        let payload: Vec<serde_json::Value> =
            response.json().context("decode collaborators response")?;
        Ok(Page {
            items: vec![(); payload.len()],
            next,
        })
    }

    fn language_breakdown(&self, _repo: &RawRepo) -> anyhow::Result<Option<Vec<String>>> {
        // The listing's primary language field is used instead.
        Ok(None)
    }
}
