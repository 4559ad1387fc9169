use crate::error::{ErrorClass, classify_error};
use crate::model::{OrgRef, ProviderKind, RawRepo};
use crate::paging::Page;

/// One implementation per hosting provider, wrapping its paginated API.
///
/// Page tokens are opaque strings owned by the implementation; `None` asks
/// for the first page. Commit and collaborator listings return unit items
/// since only their count matters to the crawl. Sub-calls take the raw repo
/// so implementations can address it however their API requires (GitLab
/// projects are addressed by numeric id, GitHub repos by owner and name).
pub trait ProviderClient {
    fn kind(&self) -> ProviderKind;

    fn list_organizations(&self, page_token: Option<&str>) -> anyhow::Result<Page<OrgRef>>;

    fn list_repositories(
        &self,
        org: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<RawRepo>>;

    fn list_commits(
        &self,
        org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>>;

    fn list_collaborators(
        &self,
        org: &str,
        repo: &RawRepo,
        page_token: Option<&str>,
    ) -> anyhow::Result<Page<()>>;

    /// Full language breakdown when the provider exposes one; `None` when
    /// only the listing's primary-language field is available.
    fn language_breakdown(&self, repo: &RawRepo) -> anyhow::Result<Option<Vec<String>>>;

    fn classify_error(&self, err: &anyhow::Error) -> ErrorClass {
        classify_error(err)
    }
}
