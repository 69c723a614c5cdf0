use scraper::{ElementRef, Html};
use serde_json::{Map, Value};

use super::dom::{css, own_text};
use super::ExtractionError;

/// Key/value pairs of the company "About us" block.
///
/// Each `dt` under an `about-us` container is a key; its value is the
/// following `dd`. A `dd` whose own text is blank (e.g. the value sits in a
/// link) falls back to its full text, cut at the first line break.
pub fn extract_about(doc: &Html) -> Result<Map<String, Value>, ExtractionError> {
    let terms = css(r#"div[data-test-id*="about-us"] dt"#)?;
    let mut about = Map::new();

    for dt in doc.select(&terms) {
        let key: String = dt.text().collect::<String>().trim().to_string();
        if key.is_empty() {
            continue;
        }
        let value = paired_definition(dt).map(definition_value).unwrap_or_default();
        about.insert(key, Value::String(value));
    }

    Ok(about)
}

/// The `dd` following `dt`, stopping at the next term.
fn paired_definition(dt: ElementRef<'_>) -> Option<ElementRef<'_>> {
    dt.next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "dt")
        .find(|el| el.value().name() == "dd")
}

fn definition_value(dd: ElementRef<'_>) -> String {
    let direct = own_text(dd).map(str::trim).unwrap_or_default();
    if !direct.is_empty() {
        return direct.to_string();
    }

    let joined = dd.text().collect::<Vec<_>>().join(" ");
    joined
        .trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
