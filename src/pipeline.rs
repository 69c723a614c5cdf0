use std::fmt::Display;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use scraper::Html;
use tokio::task::JoinError;
use tracing::{info, info_span, warn, Instrument};

use crate::classify::{classify, matches_kind};
use crate::envelope::{aggregate, CompanyEntry, LinkedinRecord, ResultEnvelope};
use crate::fetch::{fetch_many, PageFetcher};
use crate::kind::EntityKind;
use crate::parser::{
    compose_company_life, parse_company_page, parse_profile_page, CompanyLifeRecord,
    CompanyRecord, ProfileRecord,
};
use crate::search::{SearchError, SearchHit, SearchProvider};

static COMPANY_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"linkedin\.com/company/([^/?#]+)").unwrap());

/// One invocation's input, as given on the command line.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub kind: EntityKind,
    pub name: String,
    pub url: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
}

impl CrawlRequest {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            url: None,
            email: None,
            country: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    pub concurrency: usize,
    pub include_life: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: 10,
            include_life: false,
        }
    }
}

/// Run the google and linkedin pipelines side by side and merge them.
///
/// Never fails: a pipeline that errors or panics contributes an empty list.
pub async fn run(
    request: &CrawlRequest,
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    options: CrawlOptions,
) -> ResultEnvelope {
    let span = info_span!("crawl", kind = %request.kind, name = %request.name);

    async move {
        log_request(request);

        let google = tokio::spawn(
            google_pipeline(Arc::clone(&search), request.name.clone(), request.kind)
                .in_current_span(),
        );
        let linkedin = tokio::spawn(
            linkedin_pipeline(search, fetcher, request.clone(), options).in_current_span(),
        );
        let (google, linkedin) = tokio::join!(google, linkedin);

        let google = settle("google", google);
        let linkedin = settle("linkedin", linkedin);
        info!(
            "Crawl finished: {} search hits, {} linkedin records",
            google.len(),
            linkedin.len()
        );
        aggregate(google, linkedin)
    }
    .instrument(span)
    .await
}

fn log_request(request: &CrawlRequest) {
    let mut parts = vec![
        format!("type: {}", request.kind),
        format!("name: {}", request.name),
    ];
    let optional = [
        ("url", &request.url),
        ("email", &request.email),
        ("country", &request.country),
    ];
    for (label, value) in optional {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("{}: {}", label, v));
        }
    }
    info!("Request received - {}", parts.join(", "));
}

fn settle<T, E: Display>(stage: &str, joined: Result<Result<Vec<T>, E>, JoinError>) -> Vec<T> {
    match joined {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            warn!("{} pipeline failed: {}", stage, e);
            Vec::new()
        }
        Err(e) => {
            warn!("{} pipeline aborted: {}", stage, e);
            Vec::new()
        }
    }
}

async fn google_pipeline(
    search: Arc<dyn SearchProvider>,
    name: String,
    kind: EntityKind,
) -> Result<Vec<SearchHit>, SearchError> {
    search.search(&name, kind).await
}

async fn linkedin_pipeline(
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    request: CrawlRequest,
    options: CrawlOptions,
) -> Result<Vec<LinkedinRecord>, SearchError> {
    let hits = search.search(&request.name, request.kind).await?;
    let urls = candidate_urls(request.url.as_deref(), &hits, request.kind);
    if urls.is_empty() {
        warn!("No LinkedIn {} pages among {} search hits", request.kind, hits.len());
        return Ok(Vec::new());
    }

    info!("Fetching {} LinkedIn {} pages", urls.len(), request.kind);
    let total = urls.len();
    let mut rx = fetch_many(Arc::clone(&fetcher), urls, options.concurrency);
    let mut records = Vec::with_capacity(total);

    // Failed fetches were already logged by the worker.
    while let Some(result) = rx.recv().await {
        let Ok(page) = result else { continue };
        let record = match request.kind {
            EntityKind::Company => {
                let overview = overview_record(&page.html);
                let life = if options.include_life {
                    life_page(fetcher.as_ref(), &page.url).await
                } else {
                    None
                };
                info!(
                    "Parsed company page {} ({})",
                    page.url,
                    overview.get("name").and_then(|n| n.as_str()).unwrap_or("Unknown")
                );
                LinkedinRecord::Company(CompanyEntry { overview, life })
            }
            EntityKind::Person => {
                info!("Parsed profile page {}", page.url);
                LinkedinRecord::Profile(profile_record(&page.html))
            }
        };
        records.push(record);
    }

    info!("Scraped {} of {} LinkedIn pages", records.len(), total);
    Ok(records)
}

/// Classified search links, with a matching caller-supplied URL first.
pub fn candidate_urls(seed: Option<&str>, hits: &[SearchHit], kind: EntityKind) -> Vec<String> {
    let mut urls = classify(hits, kind);
    if let Some(seed) = seed.map(str::trim).filter(|s| matches_kind(s, kind)) {
        if !urls.iter().any(|u| u == seed) {
            urls.insert(0, seed.to_string());
        }
    }
    urls
}

/// `/company/<slug>/life` for a company overview URL.
pub fn life_url(company_url: &str) -> Option<String> {
    let slug = COMPANY_SLUG_RE.captures(company_url)?.get(1)?.as_str();
    Some(format!("https://www.linkedin.com/company/{}/life", slug))
}

async fn life_page(fetcher: &dyn PageFetcher, company_url: &str) -> Option<CompanyLifeRecord> {
    let Some(url) = life_url(company_url) else {
        warn!("Cannot derive life page from {}", company_url);
        return None;
    };
    match fetcher.fetch(&url).await {
        Ok(page) => Some(life_record(&page.html)),
        Err(e) => {
            warn!("Life page skipped: {}", e);
            None
        }
    }
}

// Parsed documents stay inside these helpers so no `Html` lives across an await.

fn overview_record(html: &str) -> CompanyRecord {
    parse_company_page(&Html::parse_document(html))
}

fn life_record(html: &str) -> CompanyLifeRecord {
    compose_company_life(&Html::parse_document(html))
}

fn profile_record(html: &str) -> ProfileRecord {
    parse_profile_page(&Html::parse_document(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(link: &str) -> SearchHit {
        SearchHit {
            title: None,
            link: Some(link.to_string()),
            snippet: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn life_url_from_overview() {
        assert_eq!(
            life_url("https://www.linkedin.com/company/nokia").as_deref(),
            Some("https://www.linkedin.com/company/nokia/life")
        );
        assert_eq!(
            life_url("https://fi.linkedin.com/company/nokia/?trk=x").as_deref(),
            Some("https://www.linkedin.com/company/nokia/life")
        );
        assert_eq!(life_url("https://www.linkedin.com/in/jane"), None);
    }

    #[test]
    fn seed_url_goes_first_once() {
        let hits = vec![
            hit("https://www.linkedin.com/company/nokia"),
            hit("https://www.linkedin.com/in/someone"),
        ];
        let urls = candidate_urls(
            Some("https://www.linkedin.com/company/nokia-networks"),
            &hits,
            EntityKind::Company,
        );
        assert_eq!(
            urls,
            vec![
                "https://www.linkedin.com/company/nokia-networks",
                "https://www.linkedin.com/company/nokia",
            ]
        );

        let again = candidate_urls(
            Some("https://www.linkedin.com/company/nokia"),
            &hits,
            EntityKind::Company,
        );
        assert_eq!(again, vec!["https://www.linkedin.com/company/nokia"]);
    }

    #[test]
    fn non_linkedin_seed_ignored() {
        let urls = candidate_urls(Some("https://www.nokia.com"), &[], EntityKind::Company);
        assert!(urls.is_empty());
    }
}
