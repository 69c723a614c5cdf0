//! Small helpers over `scraper` that mirror XPath-style field lookups.

use scraper::{ElementRef, Selector};

use super::ExtractionError;

pub fn css(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// First direct text node of the first element matching `sel` under `scope`,
/// like `.//path/text()` taking the first hit.
pub fn first_own_text<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<&'a str> {
    scope.select(sel).find_map(own_text)
}

/// First direct text child of `el`.
pub fn own_text<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.children().find_map(|child| child.value().as_text().map(|t| &**t))
}

/// Attribute of the first element matching `sel` that carries it.
pub fn first_attr<'a>(scope: ElementRef<'a>, sel: &Selector, attr: &str) -> Option<&'a str> {
    scope.select(sel).find_map(|el| el.value().attr(attr))
}

/// Trim, and map blank strings to `None`.
pub fn clean(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Drop everything from the first `?` on.
pub fn strip_query(link: &str) -> &str {
    link.split('?').next().unwrap_or(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn own_text_ignores_nested() {
        let doc = Html::parse_fragment("<div><h3>  Jane <b>Doe</b></h3></div>");
        let sel = css("h3").unwrap();
        assert_eq!(first_own_text(doc.root_element(), &sel), Some("  Jane "));
    }

    #[test]
    fn clean_blank() {
        assert_eq!(clean(Some(" \n ")), None);
        assert_eq!(clean(Some(" CEO \n")), Some("CEO".to_string()));
        assert_eq!(clean(None), None);
    }

    #[test]
    fn strip_query_string() {
        assert_eq!(
            strip_query("https://www.linkedin.com/company/acme?trk=123"),
            "https://www.linkedin.com/company/acme"
        );
        assert_eq!(strip_query("https://x/y"), "https://x/y");
    }

    #[test]
    fn bad_selector() {
        assert!(matches!(css("div[["), Err(ExtractionError::Selector { .. })));
    }
}
