use serde::{Deserialize, Serialize};
use tracing::error;

use crate::parser::{CompanyLifeRecord, CompanyRecord, ProfileRecord};
use crate::search::SearchHit;

const EMPTY_ENVELOPE: &str = r#"{"sources":{"google":[],"linkedin":[]}}"#;

/// One company page: its overview and, when crawled, its life page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub overview: CompanyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<CompanyLifeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkedinRecord {
    Company(CompanyEntry),
    Profile(ProfileRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sources {
    pub google: Vec<SearchHit>,
    pub linkedin: Vec<LinkedinRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub sources: Sources,
}

impl ResultEnvelope {
    /// Compact JSON for stdout. Falls back to the empty envelope, so the
    /// caller always has a document to print.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            error!("Failed to serialize result: {}", e);
            EMPTY_ENVELOPE.to_string()
        })
    }
}

/// Merge both pipelines' output. Failed stages are passed in as empty lists.
pub fn aggregate(google: Vec<SearchHit>, linkedin: Vec<LinkedinRecord>) -> ResultEnvelope {
    ResultEnvelope {
        sources: Sources { google, linkedin },
    }
}
