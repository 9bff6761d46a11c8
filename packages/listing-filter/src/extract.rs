//! Listing extraction from a saved search-results page.
//!
//! Parses the page with the `scraper` crate and walks the result containers
//! the marketplace marks with its search-result component attribute.

use std::fs;
use std::path::Path;

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::types::Listing;

/// Selector for one listing's result container.
pub const RESULT_CONTAINER_SELECTOR: &str =
    "div.s-result-item[data-component-type='s-search-result']";

/// Selector for the title text span inside a result container's heading.
pub const TITLE_SELECTOR: &str = "h2 span";

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FilterError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Extract listings from the page at `path`, in document order.
///
/// Containers without a resolvable title are skipped silently; an empty
/// result means the page had no recognizable listings, which the caller
/// treats as a terminal condition rather than an error.
pub fn extract_listings(path: &Path) -> Result<Vec<Listing>> {
    let html = fs::read_to_string(path).map_err(|e| FilterError::io(path, e))?;
    let document = Html::parse_document(&html);
    let listings = listings_from(&document)?;

    debug!(
        path = %path.display(),
        count = listings.len(),
        "Extracted listings"
    );

    Ok(listings)
}

/// Extract listings from an already-parsed document.
///
/// Each returned [`Listing`] carries the `NodeId` of its container within
/// `document`'s tree.
pub fn listings_from(document: &Html) -> Result<Vec<Listing>> {
    let container_selector = parse_selector(RESULT_CONTAINER_SELECTOR)?;
    let title_selector = parse_selector(TITLE_SELECTOR)?;

    let mut listings = Vec::new();
    for container in document.select(&container_selector) {
        let Some(title) = container.select(&title_selector).next() else {
            continue;
        };
        let name = title.text().collect::<String>();
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        listings.push(Listing {
            name: name.to_string(),
            node: container.id(),
        });
    }

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_page(bodies: &[&str]) -> String {
        let items: String = bodies
            .iter()
            .map(|body| {
                format!(
                    r#"<div class="s-result-item" data-component-type="s-search-result">{}</div>"#,
                    body
                )
            })
            .collect();
        format!("<html><body><div class=\"s-main-slot\">{}</div></body></html>", items)
    }

    #[test]
    fn test_extracts_in_document_order() {
        let html = result_page(&[
            "<h2><span>First Sled</span></h2>",
            "<h2><span>Second Sled</span></h2>",
            "<h2><span>Third Sled</span></h2>",
        ]);
        let document = Html::parse_document(&html);

        let listings = listings_from(&document).unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["First Sled", "Second Sled", "Third Sled"]);
    }

    #[test]
    fn test_trims_title_whitespace() {
        let html = result_page(&["<h2><span>\n   Snow Sled  \n</span></h2>"]);
        let document = Html::parse_document(&html);

        let listings = listings_from(&document).unwrap();
        assert_eq!(listings[0].name, "Snow Sled");
    }

    #[test]
    fn test_skips_containers_without_titles() {
        let html = result_page(&[
            "<h2><span>Named Sled</span></h2>",
            "<div class=\"price\">$20</div>",
            "<h2><span>   </span></h2>",
        ]);
        let document = Html::parse_document(&html);

        let listings = listings_from(&document).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "Named Sled");
    }

    #[test]
    fn test_ignores_unmarked_containers() {
        let html = r#"<html><body>
            <div class="s-result-item"><h2><span>No component attribute</span></h2></div>
            <div data-component-type="s-search-result"><h2><span>Not a result item</span></h2></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        assert!(listings_from(&document).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_listings(Path::new("/nonexistent/results.html")).unwrap_err();
        assert!(matches!(err, FilterError::Io { .. }));
    }
}
