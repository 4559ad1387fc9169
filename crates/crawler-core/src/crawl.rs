use crate::backoff::BackoffPolicy;
use crate::metrics::build_repo_record;
use crate::model::{OrgRef, RepoInformation};
use crate::paging::walk_pages;
use crate::provider::ProviderClient;
use crate::sink::ResultSink;
use tracing::{info, warn};

/// Drives one provider crawl: enumerate organizations (unless scoped to
/// one), walk each organization's repositories, and checkpoint the owned
/// result collection through the sink after every repository.
///
/// A failed walk is logged and aborts only that walk; everything
/// accumulated so far is kept and returned.
pub struct CrawlOrchestrator<'a> {
    client: &'a dyn ProviderClient,
    sink: &'a mut dyn ResultSink,
    backoff: BackoffPolicy,
    scope: Option<String>,
    results: Vec<RepoInformation>,
}

impl<'a> CrawlOrchestrator<'a> {
    pub fn new(
        client: &'a dyn ProviderClient,
        sink: &'a mut dyn ResultSink,
        backoff: BackoffPolicy,
        scope: Option<String>,
    ) -> Self {
        Self {
            client,
            sink,
            backoff,
            scope,
            results: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<RepoInformation> {
        match self.scope.take() {
            Some(org) => {
                info!(org = %org, "crawling configured scope");
                if let Err(err) = self.crawl_org(&org) {
                    warn!(org = %org, error = %err, "repository walk ended early");
                }
            }
            None => {
                let client = self.client;
                let mut orgs: Vec<OrgRef> = Vec::new();
                let walk = walk_pages(
                    |page| client.list_organizations(page),
                    |err| client.classify_error(err),
                    &self.backoff,
                    |org| orgs.push(org),
                );
                if let Err(err) = walk {
                    warn!(error = %err, "organization discovery ended early");
                }
                info!(count = orgs.len(), "discovered organizations");
                for org in orgs {
                    if let Err(err) = self.crawl_org(&org.name) {
                        warn!(org = %org.name, error = %err, "repository walk ended early");
                    }
                }
            }
        }
        self.results
    }

    fn crawl_org(&mut self, org: &str) -> anyhow::Result<()> {
        info!(provider = %self.client.kind(), org, "crawling repositories");
        let client = self.client;
        let backoff = &self.backoff;
        let results = &mut self.results;
        let sink = &mut *self.sink;
        walk_pages(
            |page| client.list_repositories(org, page),
            |err| client.classify_error(err),
            backoff,
            |raw| {
                let record = build_repo_record(client, backoff, org, &raw);
                results.push(record);
                if let Err(err) = sink.write(results) {
                    warn!(error = %err, "failed to checkpoint results");
                }
            },
        )
    }
}
