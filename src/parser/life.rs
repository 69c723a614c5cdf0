use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::dom::{clean, css, first_attr, first_own_text, strip_query};
use super::ExtractionError;

const LEADERS: &str = r#"section[data-test-id="leaders-at"] > div > ul > li"#;
const AFFILIATED: &str = r#"section[data-test-id="affiliated-pages"] > div > div > ul > li"#;
const SIMILAR: &str = r#"section[data-test-id="similar-pages"] > div > div > ul > li"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLifeRecord {
    pub leaders: Vec<Leader>,
    pub affiliated_pages: Vec<RelatedPage>,
    pub similar_pages: Vec<RelatedPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub name: String,
    pub title: String,
    pub linkedin_profile_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPage {
    pub name: String,
    pub industry: Option<String>,
    pub address: Option<String>,
    pub linkedin_url: String,
}

/// Selectors for one card inside a list section.
struct CardFields {
    name: Selector,
    title: Selector,
    industry: Selector,
    address: Selector,
    link: Selector,
}

impl CardFields {
    fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            name: css("a > div > h3")?,
            title: css("a > div > h4")?,
            industry: css("a > div > p:nth-of-type(1)")?,
            address: css("a > div > p:nth-of-type(2)")?,
            link: css("a[href]")?,
        })
    }

    fn link(&self, card: ElementRef<'_>) -> Option<String> {
        clean(first_attr(card, &self.link, "href")).map(|l| strip_query(&l).to_string())
    }

    fn leader(&self, card: ElementRef<'_>) -> Option<Leader> {
        Some(Leader {
            name: clean(first_own_text(card, &self.name))?,
            title: clean(first_own_text(card, &self.title))?,
            linkedin_profile_link: self.link(card)?,
        })
    }

    fn page(&self, card: ElementRef<'_>) -> Option<RelatedPage> {
        Some(RelatedPage {
            name: clean(first_own_text(card, &self.name))?,
            industry: clean(first_own_text(card, &self.industry)),
            address: clean(first_own_text(card, &self.address)),
            linkedin_url: self.link(card)?,
        })
    }
}

/// Parse the three list sections of a company "life" page. A section that
/// cannot be read comes back empty; incomplete cards are dropped.
pub fn compose_company_life(doc: &Html) -> CompanyLifeRecord {
    let fields = match CardFields::new() {
        Ok(f) => f,
        Err(e) => {
            warn!("Company life page unreadable: {}", e);
            return CompanyLifeRecord::default();
        }
    };

    CompanyLifeRecord {
        leaders: section(doc, LEADERS, |card| fields.leader(card)),
        affiliated_pages: section(doc, AFFILIATED, |card| fields.page(card)),
        similar_pages: section(doc, SIMILAR, |card| fields.page(card)),
    }
}

fn section<T>(doc: &Html, items: &str, parse: impl Fn(ElementRef<'_>) -> Option<T>) -> Vec<T> {
    match css(items) {
        Ok(sel) => doc.select(&sel).filter_map(parse).collect(),
        Err(e) => {
            warn!("Skipping life section: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn nokia_life_leaders() {
        let life = compose_company_life(&fixture("nokia_life"));
        // The card without a title is dropped.
        assert_eq!(life.leaders.len(), 2);
        assert_eq!(life.leaders[0].name, "Pekka Lundmark");
        assert_eq!(life.leaders[0].title, "President and CEO");
        assert_eq!(
            life.leaders[0].linkedin_profile_link,
            "https://www.linkedin.com/in/pekka-lundmark"
        );
        assert!(life.leaders.iter().all(|l| l.name != "Untitled Person"));
    }

    #[test]
    fn nokia_life_pages() {
        let life = compose_company_life(&fixture("nokia_life"));
        assert_eq!(life.affiliated_pages.len(), 1);
        let bell = &life.affiliated_pages[0];
        assert_eq!(bell.name, "Nokia Bell Labs");
        assert_eq!(bell.industry.as_deref(), Some("Research Services"));
        assert_eq!(bell.address.as_deref(), Some("Murray Hill, New Jersey"));
        assert_eq!(bell.linkedin_url, "https://www.linkedin.com/company/nokia-bell-labs");

        assert_eq!(life.similar_pages.len(), 2);
        assert_eq!(life.similar_pages[0].linkedin_url, "https://www.linkedin.com/company/acme");
        assert_eq!(life.similar_pages[1].industry, None);
        assert_eq!(life.similar_pages[1].address, None);
    }

    #[test]
    fn missing_sections_are_empty() {
        let life = compose_company_life(&Html::parse_document("<html><body></body></html>"));
        assert_eq!(life, CompanyLifeRecord::default());
    }

    #[test]
    fn serialized_keys() {
        let life = compose_company_life(&fixture("nokia_life"));
        let v = serde_json::to_value(&life).unwrap();
        assert!(v["leaders"][0].get("linkedinProfileLink").is_some());
        assert!(v["affiliatedPages"][0].get("linkedinUrl").is_some());
        assert!(v["similarPages"].is_array());
    }
}
