use crate::kind::EntityKind;
use crate::search::SearchHit;

/// Keep the links of `hits` that point at a LinkedIn page of `kind`.
///
/// Hits without a link are skipped. Input order is preserved and duplicates
/// are kept.
pub fn classify(hits: &[SearchHit], kind: EntityKind) -> Vec<String> {
    let marker = kind.path_marker();
    hits.iter()
        .filter_map(|hit| hit.link.as_deref())
        .filter(|link| link.contains(marker))
        .map(str::to_string)
        .collect()
}

/// True if a single URL belongs to `kind`.
pub fn matches_kind(url: &str, kind: EntityKind) -> bool {
    url.contains(kind.path_marker())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(link: Option<&str>) -> SearchHit {
        SearchHit {
            title: Some("t".into()),
            link: link.map(str::to_string),
            snippet: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn company_links_only() {
        let hits = vec![
            hit(Some("https://www.linkedin.com/company/nokia")),
            hit(Some("https://www.linkedin.com/in/pekka-lundmark")),
            hit(Some("https://fi.linkedin.com/company/nokia-networks?trk=x")),
        ];
        let urls = classify(&hits, EntityKind::Company);
        assert_eq!(
            urls,
            vec![
                "https://www.linkedin.com/company/nokia",
                "https://fi.linkedin.com/company/nokia-networks?trk=x",
            ]
        );
    }

    #[test]
    fn person_links_only() {
        let hits = vec![
            hit(Some("https://www.linkedin.com/company/nokia")),
            hit(Some("https://www.linkedin.com/in/pekka-lundmark")),
        ];
        let urls = classify(&hits, EntityKind::Person);
        assert_eq!(urls, vec!["https://www.linkedin.com/in/pekka-lundmark"]);
    }

    #[test]
    fn missing_links_skipped_and_duplicates_kept() {
        let hits = vec![
            hit(None),
            hit(Some("https://www.linkedin.com/company/acme")),
            hit(Some("https://www.linkedin.com/company/acme")),
        ];
        assert_eq!(classify(&hits, EntityKind::Company).len(), 2);
    }

    #[test]
    fn output_is_subset_with_marker() {
        let hits = vec![
            hit(Some("https://example.com/company/acme")),
            hit(Some("https://www.linkedin.com/company/acme")),
            hit(Some("https://www.linkedin.com/school/acme")),
            hit(Some("https://www.linkedin.com/posts/acme_123")),
        ];
        let links: Vec<&str> = hits.iter().filter_map(|h| h.link.as_deref()).collect();
        for kind in [EntityKind::Company, EntityKind::Person] {
            for url in classify(&hits, kind) {
                assert!(links.contains(&url.as_str()));
                assert!(url.contains(kind.path_marker()));
            }
        }
    }

    #[test]
    fn empty_input() {
        assert!(classify(&[], EntityKind::Company).is_empty());
    }
}
