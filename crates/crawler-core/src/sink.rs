use crate::model::RepoInformation;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;

/// Incremental persistence: each call serializes the entire accumulated
/// collection, not a delta.
pub trait ResultSink {
    fn write(&mut self, results: &[RepoInformation]) -> anyhow::Result<()>;
}

/// Full-rewrite checkpoint to a single JSON file. Prior content is
/// overwritten on every call; the acceptable loss window on a crash is the
/// most recent repository's worth of progress.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ResultSink for JsonFileSink {
    fn write(&mut self, results: &[RepoInformation]) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(results).context("serialize results")?;
        fs::write(&self.path, data).context("write results file")?;
        Ok(())
    }
}
