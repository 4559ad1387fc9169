use crawler_core::model::RawRepo;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub(crate) struct OrgItem {
    pub(crate) login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoItem {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) html_url: String,
    #[serde(default)]
    pub(crate) private: bool,
    #[serde(default)]
    pub(crate) archived: bool,
    #[serde(default)]
    pub(crate) disabled: bool,
    #[serde(default)]
    pub(crate) forks_count: u64,
    #[serde(default)]
    pub(crate) stargazers_count: u64,
    #[serde(default)]
    pub(crate) watchers_count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    // Last push is not exposed on the listing; last update is the
    // closest activity signal available without extra calls.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) updated_at: OffsetDateTime,
    pub(crate) language: Option<String>,
}

impl RepoItem {
    pub(crate) fn into_raw(self) -> RawRepo {
        RawRepo {
            id: self.id.to_string(),
            name: self.name,
            organization: None,
            url: self.html_url,
            private: self.private,
            archived: self.archived,
            disabled: self.disabled,
            forks: self.forks_count,
            stars: self.stargazers_count,
            watchers: self.watchers_count,
            created_on: self.created_at,
            last_commit: self.updated_at,
            language: self.language,
            commit_count: None,
        }
    }
}
