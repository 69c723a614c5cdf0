use scraper::Html;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::about::extract_about;
use super::ld_json::{LdGraph, NodeKind};
use super::ExtractionError;

/// Flat company overview: projected microdata plus About-section pairs.
pub type CompanyRecord = Map<String, Value>;

/// Project the page's first `Organization` node.
pub fn extract_microdata(doc: &Html) -> Result<Map<String, Value>, ExtractionError> {
    let graph = LdGraph::from_document(doc)?;
    let org = graph
        .first(NodeKind::Organization)
        .ok_or(ExtractionError::MissingEntity(NodeKind::Organization.as_str()))?;
    Ok(project_organization(org))
}

fn project_organization(org: &Map<String, Value>) -> Map<String, Value> {
    let field = |key: &str| org.get(key).cloned().unwrap_or(Value::Null);
    let employees = org
        .get("numberOfEmployees")
        .and_then(|n| n.get("value"))
        .cloned()
        .unwrap_or(Value::Null);

    let mut out = Map::new();
    out.insert("name".into(), field("name"));
    out.insert("url".into(), field("url"));
    out.insert("mainAddress".into(), field("address"));
    out.insert("description".into(), field("description"));
    out.insert("numberOfEmployees".into(), employees);
    out.insert("logo".into(), field("logo"));
    out
}

/// Merge the two passes; About-section values replace microdata values.
pub fn compose_company(microdata: Map<String, Value>, about: Map<String, Value>) -> CompanyRecord {
    let mut record = microdata;
    record.extend(about);
    record
}

/// Extract a company overview page. Failing passes contribute nothing.
pub fn parse_company_page(doc: &Html) -> CompanyRecord {
    let microdata = extract_microdata(doc).unwrap_or_else(|e| {
        warn!("Company microdata unavailable: {}", e);
        Map::new()
    });
    let about = extract_about(doc).unwrap_or_else(|e| {
        warn!("Company about section unavailable: {}", e);
        Map::new()
    });
    debug!("Parsed company overview with {} about fields", about.len());
    compose_company(microdata, about)
}
