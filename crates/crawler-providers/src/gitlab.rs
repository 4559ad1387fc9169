use crate::gitlab_models::{GroupItem, ProjectItem};
use crate::http::{ensure_success, gitlab_rate_limited, send};
use crate::provider_paging::{next_page_from_header, page_number};
use anyhow::Context;
use crawler_core::model::{OrgRef, ProviderKind, RawRepo};
use crawler_core::paging::Page;
use crawler_core::provider::ProviderClient;
use reqwest::blocking::{Client, Response};
use tracing::debug;

const DEFAULT_HOST: &str = "https://gitlab.com/api/v4";
const NEXT_PAGE_HEADER: &str = "x-next-page";
const LIST_PAGE_SIZE: u32 = 10;
const COMMIT_PAGE_SIZE: u32 = 100;

pub struct GitLabCrawler {
    client: Client,
    host: String,
    token: String,
}

impl GitLabCrawler {
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
            .header("PRIVATE-TOKEN", self.token.as_str());
        ensure_success(send(builder)?, gitlab_rate_limited)
    }
}

fn encode_group(path: &str) -> String {
    path.replace('/', "%2F")
}

impl ProviderClient for GitLabCrawler {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitLab
    }

    fn list_organizations(&self, page_token: Option<&str>) -> anyhow::Result<Page<OrgRef>> {
        let page = page_number(page_token)?;
        debug!(page, "listing GitLab groups");
        let url = format!(
            "{}/groups?membership=true&per_page={LIST_PAGE_SIZE}&page={page}",
            self.host
        );
        let response = self.get(url).context("call GitLab list groups")?;
        let next = next_page_from_header(response.headers(), NEXT_PAGE_HEADER);
        let payload: Vec<GroupItem> = response.json().context("decode groups response")?;
        Ok(Page {
            items: payload
                .into_iter()
                .map(|group| OrgRef {
                    name: group.full_path,
                })
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
        debug!(group = org, page, "listing GitLab projects");
        let url = format!(
            "{}/groups/{}/projects?statistics=true&per_page={LIST_PAGE_SIZE}&page={page}",
            self.host,
            encode_group(org)
        );
        let response = self.get(url).context("call GitLab list projects")?;
        let next = next_page_from_header(response.headers(), NEXT_PAGE_HEADER);
        let payload: Vec<ProjectItem> = response.json().context("decode projects response")?;
        Ok(Page {
            items: payload.into_iter().map(ProjectItem::into_raw).collect(),
            next,
        })
    }

    fn list_commits(
        &self,
        _org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        // Project statistics already carry the total when the listing was
        // allowed to include them; serve that as a single page.
        if let Some(count) = repo.commit_count
            && page_token.is_none()
        {
            return Ok(Page::last(vec![(); count as usize]));
        }
        let page = page_number(page_token)?;
        let url = format!(
            "{}/projects/{}/repository/commits?per_page={COMMIT_PAGE_SIZE}&page={page}",
            self.host, repo.id
        );
        let response = self.get(url).context("call GitLab list commits")?;
        let next = next_page_from_header(response.headers(), NEXT_PAGE_HEADER);
        let payload: Vec<serde_json::Value> =
            response.json().context("decode commits response")?;
        Ok(Page {
            items: vec![(); payload.len()],
            next,
        })
    }

    fn list_collaborators(
        &self,
        _org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        let page = page_number(page_token)?;
        let url = format!(
            "{}/projects/{}/users?per_page={LIST_PAGE_SIZE}&page={page}",
            self.host, repo.id
        );
        let response = self.get(url).context("call GitLab list project users")?;
        let next = next_page_from_header(response.headers(), NEXT_PAGE_HEADER);
        let payload: Vec<serde_json::Value> =
            response.json().context("decode project users response")?;
        Ok(Page {
            items: vec![(); payload.len()],
            next,
        })
    }

    fn language_breakdown(&self, repo: &RawRepo) -> anyhow::Result<Option<Vec<String>>> {
        let url = format!("{}/projects/{}/languages", self.host, repo.id);
        let response = self.get(url).context("call GitLab project languages")?;
        let payload: serde_json::Map<String, serde_json::Value> =
            response.json().context("decode languages response")?;
        Ok(Some(payload.keys().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_group_paths_are_encoded() {
        assert_eq!(encode_group("acme"), "acme");
        assert_eq!(encode_group("acme/tools/ci"), "acme%2Ftools%2Fci");
    }

    #[test]
    fn base_url_override_is_normalized() {
        let crawler =
            GitLabCrawler::new("token".to_string(), Some("https://git.example.com/api/v4/"))
                .unwrap();
        assert_eq!(crawler.host, "https://git.example.com/api/v4");
        let crawler = GitLabCrawler::new("token".to_string(), None).unwrap();
        assert_eq!(crawler.host, DEFAULT_HOST);
    }
}
