//! Scripted in-memory provider used across the core test suites.

use crate::error::ApiError;
use crate::model::{OrgRef, ProviderKind, RawRepo, RepoInformation};
use crate::paging::Page;
use crate::provider::ProviderClient;
use crate::sink::ResultSink;
use std::cell::Cell;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};

#[derive(Default)]
pub(crate) struct MockProvider {
    pub(crate) org_pages: Vec<Vec<OrgRef>>,
    pub(crate) repo_pages: Vec<Vec<RawRepo>>,
    /// When set, asking for the page after the last listing page fails
    /// with a fatal status instead of terminating normally.
    pub(crate) fail_after_last_repo_page: bool,
    pub(crate) commit_counts: HashMap<String, u64>,
    pub(crate) collaborator_counts: HashMap<String, u64>,
    pub(crate) breakdowns: HashMap<String, Vec<String>>,
    pub(crate) fail_commits_for: Vec<String>,
    pub(crate) fail_collaborators_for: Vec<String>,
    pub(crate) fail_languages_for: Vec<String>,
    pub(crate) org_calls: Cell<u32>,
}

fn page_index(token: Option<&str>) -> usize {
    token.and_then(|value| value.parse().ok()).unwrap_or(0)
}

fn count_page(count: u64) -> Page<()> {
    Page::last(vec![(); count as usize])
}

impl ProviderClient for MockProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn list_organizations(&self, page_token: Option<&str>) -> anyhow::Result<Page<OrgRef>> {
        self.org_calls.set(self.org_calls.get() + 1);
        let idx = page_index(page_token);
        let items = self.org_pages.get(idx).cloned().unwrap_or_default();
        let next = if idx + 1 < self.org_pages.len() {
            Some((idx + 1).to_string())
        } else {
            None
        };
        Ok(Page { items, next })
    }

    fn list_repositories(
        &self,
        _org: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<RawRepo>> {
        let idx = page_index(page_token);
        if self.repo_pages.is_empty() {
            return Ok(Page::last(Vec::new()));
        }
        if idx >= self.repo_pages.len() {
            return Err(ApiError::Status { status: 404 }.into());
        }
        let items = self.repo_pages[idx].clone();
        let next = if idx + 1 < self.repo_pages.len() {
            Some((idx + 1).to_string())
        } else if self.fail_after_last_repo_page {
            Some(self.repo_pages.len().to_string())
        } else {
            None
        };
        Ok(Page { items, next })
    }

    fn list_commits(
        &self,
        _org: &str,
        repo: &RawRepo,
        _page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        if self.fail_commits_for.contains(&repo.name) {
            return Err(ApiError::Status { status: 404 }.into());
        }
        Ok(count_page(
            self.commit_counts.get(&repo.name).copied().unwrap_or(0),
        ))
    }

    fn list_collaborators(
        &self,
        _org: &str,
        repo: &RawRepo,
        _page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>> {
        if self.fail_collaborators_for.contains(&repo.name) {
            return Err(ApiError::Status { status: 404 }.into());
        }
        Ok(count_page(
            self.collaborator_counts
                .get(&repo.name)
                .copied()
                .unwrap_or(0),
        ))
    }

    fn language_breakdown(&self, repo: &RawRepo) -> anyhow::Result<Option<Vec<String>>> {
        if self.fail_languages_for.contains(&repo.name) {
            return Err(ApiError::Status { status: 404 }.into());
        }
        Ok(self.breakdowns.get(&repo.name).cloned())
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) writes: Vec<Vec<RepoInformation>>,
}

impl ResultSink for RecordingSink {
    fn write(&mut self, results: &[RepoInformation]) -> anyhow::Result<()> {
        self.writes.push(results.to_vec());
        Ok(())
    }
}

pub(crate) fn sample_repo(
    name: &str,
    created_days_ago: i64,
    last_commit_days_ago: i64,
) -> RawRepo {
    let now = OffsetDateTime::now_utc();
    RawRepo {
        id: name.to_string(),
        name: name.to_string(),
        organization: None,
        url: format!("https://example.com/{name}"),
        private: false,
        archived: false,
        disabled: false,
        forks: 2,
        stars: 5,
        watchers: 5,
        created_on: now - Duration::days(created_days_ago),
        last_commit: now - Duration::days(last_commit_days_ago),
        language: None,
        commit_count: None,
    }
}

pub(crate) fn sample_record(name: &str) -> RepoInformation {
    let now = OffsetDateTime::now_utc();
    RepoInformation {
        name: name.to_string(),
        organization: "acme".to_string(),
        url: format!("https://example.com/{name}"),
        private: false,
        status: String::new(),
        number_of_forks: 2,
        number_of_stars: 5,
        number_of_watchers: 5,
        created_on: now - Duration::days(100),
        last_commit: now - Duration::days(10),
        is_active: true,
        number_of_commits: 50,
        average_commits_per_day: 0.5,
        languages: "Go,Shell".to_string(),
        number_of_collaborators: 3,
    }
}
