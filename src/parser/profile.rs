use scraper::Html;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::ld_json::{LdGraph, NodeKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile: Map<String, Value>,
    pub posts: Vec<Map<String, Value>>,
}

/// Split a profile page graph into the person and their articles.
///
/// Only the first `Person` node is used. A `worksFor` list keeps just its
/// first employer.
pub fn compose_profile(graph: &LdGraph) -> ProfileRecord {
    let mut profile = graph.first(NodeKind::Person).cloned().unwrap_or_default();
    if let Some(Value::Array(employers)) = profile.get_mut("worksFor") {
        employers.truncate(1);
    }

    let posts = graph.all(NodeKind::Article).cloned().collect();
    ProfileRecord { profile, posts }
}

pub fn parse_profile_page(doc: &Html) -> ProfileRecord {
    match LdGraph::from_document(doc) {
        Ok(graph) => {
            let record = compose_profile(&graph);
            if record.profile.is_empty() {
                warn!("No Person data found in JSON-LD");
            }
            record
        }
        Err(e) => {
            warn!("Profile microdata unavailable: {}", e);
            ProfileRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture(name: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn works_for_truncated() {
        let graph = LdGraph::parse(
            &json!({ "@graph": [
                { "@type": "Person", "name": "Jane", "worksFor": [{ "name": "X" }, { "name": "Y" }] }
            ]})
            .to_string(),
        )
        .unwrap();
        let record = compose_profile(&graph);
        assert_eq!(record.profile["worksFor"], json!([{ "name": "X" }]));
    }

    #[test]
    fn works_for_object_untouched() {
        let graph =
            LdGraph::parse(r#"{"@type":"Person","name":"Jane","worksFor":{"name":"X"}}"#).unwrap();
        let record = compose_profile(&graph);
        assert_eq!(record.profile["worksFor"], json!({ "name": "X" }));
    }

    #[test]
    fn no_person_gives_empty_profile() {
        let graph = LdGraph::parse(r#"[{"@type":"Article","headline":"only post"}]"#).unwrap();
        let record = compose_profile(&graph);
        assert!(record.profile.is_empty());
        assert_eq!(record.posts.len(), 1);
    }

    #[test]
    fn profile_page_fixture() {
        let record = parse_profile_page(&fixture("jane_profile"));
        assert_eq!(record.profile["name"], "Jane Virtanen");
        assert_eq!(record.profile["worksFor"].as_array().unwrap().len(), 1);
        assert_eq!(record.profile["worksFor"][0]["name"], "Nokia");
        let headlines: Vec<&str> = record
            .posts
            .iter()
            .filter_map(|p| p.get("headline").and_then(Value::as_str))
            .collect();
        assert_eq!(headlines, vec!["5G in practice", "Ten years at Nokia"]);
    }

    #[test]
    fn page_without_ld_json() {
        let record = parse_profile_page(&Html::parse_document("<p>login wall</p>"));
        assert_eq!(record, ProfileRecord::default());
    }
}
