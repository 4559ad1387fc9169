use super::*;

#[derive(Parser)]
#[command(
    name = "repocrawler",
    version,
    about = "Crawls all source control repositories you have access to and reports back"
)]
pub(super) struct Cli {
    #[arg(
        long,
        global = true,
        help = "Scope the crawl to a single organization or group"
    )]
    pub(super) organization: Option<String>,
    #[arg(long, global = true, help = "File the crawl results are recorded to")]
    pub(super) output: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "API base URL of a self-hosted instance instead of the public endpoint"
    )]
    pub(super) scm_url: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Environment variable to read the API token from"
    )]
    pub(super) token_name: Option<String>,
    #[arg(long, global = true, help = "Path to a JSON config file")]
    pub(super) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "Crawl GitHub or a GitHub Enterprise instance")]
    Github,
    #[command(about = "Crawl GitLab.com or a self-hosted GitLab instance")]
    Gitlab,
}

impl Commands {
    pub(super) fn provider(&self) -> ProviderKind {
        match self {
            Commands::Github => ProviderKind::GitHub,
            Commands::Gitlab => ProviderKind::GitLab,
        }
    }
}
