use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Script references found in a page, both in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScripts {
    /// `src` attribute of every script tag that has one, duplicates kept.
    pub sources: Vec<String>,
    /// Text of every script tag with a body and without a non-empty `src`.
    pub inline: Vec<String>,
}

/// Split `html` into external script references and inline script bodies.
///
/// Never fails: a selector error is logged and produces an empty result.
pub fn locate(html: &str) -> PageScripts {
    match locate_scripts(html) {
        Ok(scripts) => scripts,
        Err(e) => {
            warn!("HTML parse error: {}", e);
            PageScripts::default()
        }
    }
}

fn locate_scripts(html: &str) -> Result<PageScripts> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!("HTML parser recovered from {} error(s)", document.errors.len());
    }

    let script_selector =
        Selector::parse("script").map_err(|e| ScanError::ParseError(e.to_string()))?;

    let mut scripts = PageScripts::default();
    for element in document.select(&script_selector) {
        let src = element.value().attr("src");
        if let Some(src) = src {
            scripts.sources.push(src.to_string());
        }
        // An empty src still counts as a source, but its body is scanned too
        if src.is_none_or(str::is_empty) {
            let body: String = element.text().collect();
            if !body.is_empty() {
                scripts.inline.push(body);
            }
        }
    }

    debug!(
        "Located {} script source(s) and {} inline script(s)",
        scripts.sources.len(),
        scripts.inline.len()
    );
    Ok(scripts)
}
