use crawler_core::model::RawRepo;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub(crate) struct GroupItem {
    pub(crate) full_path: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItem {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) web_url: String,
    pub(crate) visibility: Option<String>,
    #[serde(default)]
    pub(crate) archived: bool,
    #[serde(default)]
    pub(crate) forks_count: u64,
    #[serde(default)]
    pub(crate) star_count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) last_activity_at: OffsetDateTime,
    #[serde(default)]
    pub(crate) shared_with_groups: Vec<SharedGroup>,
    pub(crate) statistics: Option<ProjectStatistics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SharedGroup {
    pub(crate) group_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectStatistics {
    pub(crate) commit_count: u64,
}

impl ProjectItem {
    pub(crate) fn into_raw(self) -> RawRepo {
        let organization = if self.shared_with_groups.is_empty() {
            None
        } else {
            Some(
                self.shared_with_groups
                    .iter()
                    .map(|group| group.group_name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };
        RawRepo {
            id: self.id.to_string(),
            name: self.name,
            organization,
            url: self.web_url,
            private: self.visibility.as_deref() != Some("public"),
            archived: self.archived,
            // GitLab has no disabled state; archival is the only one.
            disabled: false,
            forks: self.forks_count,
            stars: self.star_count,
            watchers: 0,
            created_on: self.created_at,
            last_commit: self.last_activity_at,
            language: None,
            commit_count: self.statistics.map(|statistics| statistics.commit_count),
        }
    }
}
