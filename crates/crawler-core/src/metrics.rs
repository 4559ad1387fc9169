use crate::backoff::BackoffPolicy;
use crate::model::{RawRepo, RepoInformation};
use crate::paging::{Page, walk_pages};
use crate::provider::ProviderClient;
use time::OffsetDateTime;
use tracing::warn;

// Roughly six months.
const ACTIVE_WINDOW_HOURS: i64 = 24 * 30 * 6;

pub fn is_active_repo(last_commit: OffsetDateTime, now: OffsetDateTime) -> bool {
    (now - last_commit).whole_hours() <= ACTIVE_WINDOW_HOURS
}

/// Elapsed days are clamped to at least one so repositories created today
/// (or clock skew) never divide by zero.
pub fn average_commits_per_day(
    commits: u64,
    created_on: OffsetDateTime,
    now: OffsetDateTime,
) -> f64 {
    let days = (now - created_on).whole_days().max(1);
    commits as f64 / days as f64
}

/// Combines one raw listing entry with the enrichment sub-calls into the
/// normalized record. Enrichment failures leave zero-valued fields; the
/// record is always produced.
pub fn build_repo_record(
    client: &dyn ProviderClient,
    backoff: &BackoffPolicy,
    org: &str,
    raw: &RawRepo,
) -> RepoInformation {
    let now = OffsetDateTime::now_utc();
    let mut record = RepoInformation {
        name: raw.name.clone(),
        organization: raw.organization.clone().unwrap_or_else(|| org.to_string()),
        url: raw.url.clone(),
        private: raw.private,
        status: raw.status(),
        number_of_forks: raw.forks,
        number_of_stars: raw.stars,
        number_of_watchers: raw.watchers,
        created_on: raw.created_on,
        last_commit: raw.last_commit,
        is_active: is_active_repo(raw.last_commit, now),
        number_of_commits: 0,
        average_commits_per_day: 0.0,
        languages: String::new(),
        number_of_collaborators: 0,
    };

    record.number_of_commits = count_items(
        |page| client.list_commits(org, raw, page),
        client,
        backoff,
        &raw.name,
        "commit history",
    );
    record.average_commits_per_day =
        average_commits_per_day(record.number_of_commits, raw.created_on, now);
    record.number_of_collaborators = count_items(
        |page| client.list_collaborators(org, raw, page),
        client,
        backoff,
        &raw.name,
        "collaborator",
    );
    record.languages = resolve_languages(client, raw);
    record
}

fn count_items<F>(
    mut fetch: F,
    client: &dyn ProviderClient,
    backoff: &BackoffPolicy,
    repo: &str,
    what: &str,
) -> u64
where
    F: FnMut(Option<&str>) -> anyhow::Result<Page<()>>,
{
    let mut count = 0u64;
    let walk = walk_pages(
        &mut fetch,
        |err| client.classify_error(err),
        backoff,
        |_| count += 1,
    );
    if let Err(err) = walk {
        warn!(repo, error = %err, "{} walk ended early, keeping partial count", what);
    }
    count
}

fn resolve_languages(client: &dyn ProviderClient, raw: &RawRepo) -> String {
    match client.language_breakdown(raw) {
        Ok(Some(languages)) => languages.join(","),
        Ok(None) => raw.language.clone().unwrap_or_default(),
        Err(err) => {
            warn!(repo = %raw.name, error = %err, "language lookup failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockProvider, sample_repo};
    use time::Duration;

    fn quiet_policy() -> BackoffPolicy {
        BackoffPolicy::with_sleeper(Box::new(|_| {}))
    }

    #[test]
    fn activity_boundary_sits_at_the_six_month_window() {
        let now = OffsetDateTime::now_utc();
        assert!(is_active_repo(now - Duration::days(179), now));
        assert!(!is_active_repo(now - Duration::days(181), now));
    }

    #[test]
    fn average_commits_is_finite_for_repos_created_today() {
        let now = OffsetDateTime::now_utc();
        let average = average_commits_per_day(10, now, now);
        assert!(average.is_finite());
        assert_eq!(average, 10.0);
    }

    #[test]
    fn builds_enriched_record_from_listing_entry() {
        let mut provider = MockProvider::default();
        provider.commit_counts.insert("widget".to_string(), 50);
        provider.collaborator_counts.insert("widget".to_string(), 3);
        provider.breakdowns.insert(
            "widget".to_string(),
            vec!["Go".to_string(), "Shell".to_string()],
        );
        let raw = sample_repo("widget", 100, 10);

        let record = build_repo_record(&provider, &quiet_policy(), "acme", &raw);

        assert_eq!(record.name, "widget");
        assert_eq!(record.organization, "acme");
        assert_eq!(record.status, "");
        assert_eq!(record.number_of_commits, 50);
        assert_eq!(record.average_commits_per_day, 0.5);
        assert_eq!(record.number_of_collaborators, 3);
        assert_eq!(record.languages, "Go,Shell");
        assert!(record.is_active);
    }

    #[test]
    fn failed_enrichment_yields_zero_valued_fields() {
        let mut provider = MockProvider::default();
        provider.fail_commits_for.push("widget".to_string());
        provider.fail_collaborators_for.push("widget".to_string());
        provider.fail_languages_for.push("widget".to_string());
        let raw = sample_repo("widget", 100, 10);

        let record = build_repo_record(&provider, &quiet_policy(), "acme", &raw);

        assert_eq!(record.number_of_commits, 0);
        assert_eq!(record.average_commits_per_day, 0.0);
        assert_eq!(record.number_of_collaborators, 0);
        assert_eq!(record.languages, "");
    }

    #[test]
    fn primary_language_is_used_without_a_breakdown() {
        let provider = MockProvider::default();
        let mut raw = sample_repo("widget", 100, 10);
        raw.language = Some("Rust".to_string());

        let record = build_repo_record(&provider, &quiet_policy(), "acme", &raw);

        assert_eq!(record.languages, "Rust");
    }

    #[test]
    fn provider_resolved_organization_wins_over_enumerated_scope() {
        let provider = MockProvider::default();
        let mut raw = sample_repo("widget", 100, 10);
        raw.organization = Some("tools,platform".to_string());

        let record = build_repo_record(&provider, &quiet_policy(), "acme", &raw);

        assert_eq!(record.organization, "tools,platform");
    }
}
