use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use linkedin_crawler::fetch::SpiderFetcher;
use linkedin_crawler::logging::init_tracing;
use linkedin_crawler::pipeline::CrawlOptions;
use linkedin_crawler::search::GoogleSearch;
use linkedin_crawler::settings::Settings;
use linkedin_crawler::{run, CrawlRequest, EntityKind};

#[derive(Parser)]
#[command(
    name = "linkedin_crawler",
    about = "Find a company or person on LinkedIn and print what their pages say as JSON"
)]
struct Cli {
    /// What to look for
    #[arg(long = "type", value_enum)]
    kind: EntityKind,
    /// Company or person name
    #[arg(long)]
    name: String,
    /// Known URL; crawled first when it is a LinkedIn page of the right type
    #[arg(long, default_value = "")]
    url: String,
    /// Contact email (logged only)
    #[arg(long, default_value = "")]
    email: String,
    /// Country (logged only)
    #[arg(long, default_value = "")]
    country: String,
    /// Config file (default: configs/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also crawl each company's life page
    #[arg(long)]
    with_life: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Credentials are checked before any work starts.
    let settings = Settings::load(cli.config.as_deref()).context("invalid configuration")?;
    init_tracing(&settings.log);

    let search = Arc::new(GoogleSearch::new(settings.google_search.clone()));
    let fetcher = Arc::new(SpiderFetcher::new(&settings.spider.api_key)?);
    let options = CrawlOptions {
        concurrency: settings.spider.concurrency,
        include_life: settings.crawl.include_life || cli.with_life,
    };

    let request = CrawlRequest {
        kind: cli.kind,
        name: cli.name,
        url: non_empty(cli.url),
        email: non_empty(cli.email),
        country: non_empty(cli.country),
    };

    let envelope = run(&request, search, fetcher, options).await;
    println!("{}", envelope.to_json());
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
