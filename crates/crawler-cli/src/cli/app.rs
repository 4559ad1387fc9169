use super::*;

pub(super) fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let provider = cli.command.provider();
    info!(provider = %provider, output = %config.output.display(), "starting crawl");

    // An empty credential aborts here, before any network call and before
    // the output file is touched.
    let token = config.resolve_token()?;

    let registry = ProviderRegistry::new();
    let client = registry.client(provider, token, config.base_url.as_deref())?;
    let mut sink = JsonFileSink::new(config.output.clone());
    let orchestrator = CrawlOrchestrator::new(
        client.as_ref(),
        &mut sink,
        BackoffPolicy::new(),
        config.organization.clone(),
    );
    let results = orchestrator.run();

    println!(
        "Recorded {} repositories to {}",
        results.len(),
        config.output.display()
    );
    Ok(())
}

pub(super) fn build_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let path = match cli.config.clone() {
        Some(path) => path,
        None => default_config_path()?,
    };
    let file = FileConfig::load(&path).context("load config file")?;

    let mut config = CrawlConfig::default();
    if let Some(organization) = file.organization {
        config.organization = Some(organization);
    }
    if let Some(output) = file.output {
        config.output = output;
    }
    if let Some(url) = file.scm_url {
        config.base_url = Some(url);
    }
    if let Some(name) = file.token_name {
        config.token_env = name;
    }

    if let Some(organization) = cli.organization.clone() {
        config.organization = Some(organization);
    }
    if let Some(output) = cli.output.clone() {
        config.output = output;
    }
    if let Some(url) = cli.scm_url.clone() {
        config.base_url = Some(url);
    }
    if let Some(name) = cli.token_name.clone() {
        config.token_env = name;
    }
    Ok(config)
}
