use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use spider_client::shapes::request::{ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn, Instrument};

/// A fetched page, tagged with the URL it was requested for.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
    pub status: Option<u16>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to create fetch client: {0}")]
    Client(String),
    #[error("fetch of {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("fetch of {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("fetch of {url} returned no content")]
    EmptyContent { url: String },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// spider.cloud backed fetcher returning rendered HTML.
pub struct SpiderFetcher {
    spider: Spider,
}

impl SpiderFetcher {
    pub fn new(api_key: &str) -> Result<Self, FetchError> {
        let spider = Spider::new(Some(api_key.to_string()))
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { spider })
    }
}

#[async_trait]
impl PageFetcher for SpiderFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let params = RequestParams {
            return_format: Some(ReturnFormatHandling::Single(ReturnFormat::Raw)),
            ..Default::default()
        };

        let start = Instant::now();
        let response = self
            .spider
            .scrape_url(url, Some(params), "application/json")
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        debug!("Fetched {} in {}ms", url, start.elapsed().as_millis());

        page_from_response(url, response)
    }
}

/// Read the first result of a spider response into a page.
fn page_from_response(url: &str, value: serde_json::Value) -> Result<FetchedPage, FetchError> {
    let parsed: serde_json::Value = match value.as_str() {
        Some(s) => serde_json::from_str(s).unwrap_or(value.clone()),
        None => value,
    };

    let first = parsed.as_array().and_then(|arr| arr.first());

    let status = first
        .and_then(|obj| obj.get("status"))
        .and_then(|s| s.as_u64())
        .and_then(|s| u16::try_from(s).ok());

    if let Some(status) = status.filter(|s| *s >= 400) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let html = first
        .and_then(|obj| obj.get("content"))
        .and_then(|c| c.as_str())
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| FetchError::EmptyContent {
            url: url.to_string(),
        })?;

    Ok(FetchedPage {
        url: url.to_string(),
        html: html.to_string(),
        status,
    })
}

/// Fetch all `urls` concurrently, at most `concurrency` at a time.
///
/// Results arrive in completion order, not submission order. The channel
/// closes once every fetch has settled.
pub fn fetch_many(
    fetcher: Arc<dyn PageFetcher>,
    urls: Vec<String>,
    concurrency: usize,
) -> mpsc::Receiver<Result<FetchedPage, FetchError>> {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let (tx, rx) = mpsc::channel(concurrency * 2);

    for url in urls {
        let fetcher = Arc::clone(&fetcher);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(
            async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = sem.acquire_owned().await.ok();
                let result = fetcher.fetch(&url).await;
                if let Err(e) = &result {
                    warn!("Fetch failed for {}: {}", url, e);
                }
                let _ = tx.send(result).await;
            }
            .in_current_span(),
        );
    }

    rx
}
