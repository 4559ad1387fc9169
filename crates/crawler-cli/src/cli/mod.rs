use anyhow::Context;
use clap::Parser;
use crawler_core::backoff::BackoffPolicy;
use crawler_core::config::{CrawlConfig, FileConfig, default_config_path};
use crawler_core::crawl::CrawlOrchestrator;
use crawler_core::model::ProviderKind;
use crawler_core::sink::JsonFileSink;
use crawler_providers::registry::ProviderRegistry;
use std::path::PathBuf;
use tracing::info;

mod app;
mod args;

use args::*;

pub fn run() -> anyhow::Result<()> {
    app::run()
}
