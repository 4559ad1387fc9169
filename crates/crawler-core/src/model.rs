use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProviderKind {
    GitHub,
    GitLab,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One organization or group discovered through a provider listing.
#[derive(Clone, Debug)]
pub struct OrgRef {
    pub name: String,
}

/// Repository fields normalized from one provider listing entry, before
/// enrichment. `organization` is set when the provider resolves its own
/// owning/shared groups; otherwise the enumerated scope applies.
#[derive(Clone, Debug)]
pub struct RawRepo {
    pub id: String,
    pub name: String,
    pub organization: Option<String>,
    pub url: String,
    pub private: bool,
    pub archived: bool,
    pub disabled: bool,
    pub forks: u64,
    pub stars: u64,
    pub watchers: u64,
    pub created_on: OffsetDateTime,
    pub last_commit: OffsetDateTime,
    pub language: Option<String>,
    pub commit_count: Option<u64>,
}

impl RawRepo {
    pub fn status(&self) -> String {
        if self.archived {
            "Archived".to_string()
        } else if self.disabled {
            "Disabled".to_string()
        } else {
            String::new()
        }
    }
}

/// The persisted record, one per discovered repository.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepoInformation {
    pub name: String,
    pub organization: String,
    #[serde(rename = "URL")]
    pub url: String,
    pub private: bool,
    pub status: String,
    pub number_of_forks: u64,
    pub number_of_stars: u64,
    pub number_of_watchers: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_commit: OffsetDateTime,
    pub is_active: bool,
    pub number_of_commits: u64,
    pub average_commits_per_day: f64,
    pub languages: String,
    pub number_of_collaborators: u64,
}
