//! Listing-page link discovery
//!
//! Index pages are never field-extracted; the only things taken from them
//! are detail-page links and the next-page link. Detail links have a
//! primary selector and a fallback for when the site renames its CSS
//! classes. Every href is resolved to an absolute URL before it leaves
//! this module.

use crate::extract::dom;
use scraper::Html;
use url::Url;

const DETAIL_LINK_SELECTORS: [&str; 2] = ["a.oan0b7", r#"a[href*="/appartements"]"#];
const NEXT_PAGE_SELECTOR: &str = r#"a[rel="next"]"#;

/// Outbound work discovered on one listing page
#[derive(Debug, Clone)]
pub struct ListingPageLinks {
    /// Absolute detail-page URLs, in document order
    pub detail_urls: Vec<Url>,

    /// Absolute URL of the next listing page, if the page links one
    pub next_page: Option<Url>,
}

/// Extracts detail links and the pagination link from a listing page
pub fn discover_links(html: &str, base_url: &Url) -> ListingPageLinks {
    let document = Html::parse_document(html);

    let detail_urls = dom::all_attrs_of_any(&document, &DETAIL_LINK_SELECTORS, "href")
        .iter()
        .filter_map(|href| resolve_link(href, base_url))
        .collect();

    let next_page = dom::first_attr(&document, NEXT_PAGE_SELECTOR, "href")
        .and_then(|href| resolve_link(&href, base_url));

    ListingPageLinks {
        detail_urls,
        next_page,
    }
}

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None for empty hrefs, fragment-only anchors, special schemes
/// (javascript:, mailto:, tel:, data:), unresolvable hrefs, and anything
/// that resolves to a non-http(s) scheme.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://classifieds.example/fr/rentals?cities=3").unwrap()
    }

    #[test]
    fn test_primary_selector_and_next_link() {
        let html = r#"<html><body>
            <a class="oan0b7" href="/fr/annonce/appartement-maarif-1">A</a>
            <a class="oan0b7" href="/fr/annonce/appartement-anfa-2">B</a>
            <a rel="next" href="/fr/rentals?cities=3&page=2">Suivant</a>
            </body></html>"#;

        let links = discover_links(html, &base_url());

        assert_eq!(links.detail_urls.len(), 2);
        assert_eq!(
            links.detail_urls[0].as_str(),
            "https://classifieds.example/fr/annonce/appartement-maarif-1"
        );
        assert_eq!(
            links.detail_urls[1].as_str(),
            "https://classifieds.example/fr/annonce/appartement-anfa-2"
        );
        assert_eq!(
            links.next_page.as_ref().map(Url::as_str),
            Some("https://classifieds.example/fr/rentals?cities=3&page=2")
        );
    }

    #[test]
    fn test_fallback_selector_when_primary_matches_nothing() {
        let html = r#"<html><body>
            <a class="renamed" href="/fr/appartements/louer-3">C</a>
            </body></html>"#;

        let links = discover_links(html, &base_url());

        assert_eq!(links.detail_urls.len(), 1);
        assert_eq!(
            links.detail_urls[0].as_str(),
            "https://classifieds.example/fr/appartements/louer-3"
        );
        assert!(links.next_page.is_none());
    }

    #[test]
    fn test_primary_match_suppresses_fallback() {
        // Both selectors match different anchors; only the primary's result
        // is used.
        let html = r#"<html><body>
            <a class="oan0b7" href="/fr/annonce/appartement-4">D</a>
            <a href="/fr/appartements/louer-5">E</a>
            </body></html>"#;

        let links = discover_links(html, &base_url());

        assert_eq!(links.detail_urls.len(), 1);
        assert_eq!(
            links.detail_urls[0].as_str(),
            "https://classifieds.example/fr/annonce/appartement-4"
        );
    }

    #[test]
    fn test_no_links_found() {
        let html = r#"<html><body><p>Aucune annonce</p></body></html>"#;
        let links = discover_links(html, &base_url());
        assert!(links.detail_urls.is_empty());
        assert!(links.next_page.is_none());
    }

    #[test]
    fn test_absolute_hrefs_kept_as_is() {
        let html = r#"<html><body>
            <a class="oan0b7" href="https://classifieds.example/fr/annonce/villa-6">F</a>
            </body></html>"#;

        let links = discover_links(html, &base_url());
        assert_eq!(
            links.detail_urls[0].as_str(),
            "https://classifieds.example/fr/annonce/villa-6"
        );
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r##"<html><body>
            <a class="oan0b7" href="javascript:void(0)">G</a>
            <a class="oan0b7" href="mailto:x@example.com">H</a>
            <a class="oan0b7" href="#top">I</a>
            <a class="oan0b7" href="/fr/annonce/appartement-7">J</a>
            </body></html>"##;

        let links = discover_links(html, &base_url());
        assert_eq!(links.detail_urls.len(), 1);
        assert_eq!(
            links.detail_urls[0].as_str(),
            "https://classifieds.example/fr/annonce/appartement-7"
        );
    }
}
