use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::kind::EntityKind;
use crate::settings::GoogleSearchSettings;

/// One item of a search response. Fields other than the three named ones are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Top results for `name` restricted to LinkedIn pages of `kind`.
    async fn search(&self, name: &str, kind: EntityKind) -> Result<Vec<SearchHit>, SearchError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

/// Google Custom Search JSON API client.
pub struct GoogleSearch {
    client: reqwest::Client,
    settings: GoogleSearchSettings,
}

impl GoogleSearch {
    pub fn new(settings: GoogleSearchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

pub fn build_query(name: &str, kind: EntityKind) -> String {
    format!("{} {}", name.trim(), kind.site_filter())
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(&self, name: &str, kind: EntityKind) -> Result<Vec<SearchHit>, SearchError> {
        let query = build_query(name, kind);
        let num = self.settings.num_results.to_string();
        info!("Searching: {}", query);

        let response = self
            .client
            .get(&self.settings.base_url)
            .query(&[
                ("key", self.settings.api_key.as_str()),
                ("cx", self.settings.search_engine_id.as_str()),
                ("q", query.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        if parsed.items.is_empty() {
            warn!("No search results for '{}'", name);
        } else {
            debug!("{} search results for '{}'", parsed.items.len(), name);
        }
        Ok(parsed.items)
    }
}
