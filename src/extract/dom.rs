//! Never-failing document query helpers
//!
//! Every function here treats "selector didn't parse" and "selector matched
//! nothing" the same way: an empty result. Extraction code built on top of
//! these helpers can therefore try a field and move on without error
//! handling at each call site.
//!
//! The `*_of_any` variants implement the fallback-strategy chain: an ordered
//! list of selector expressions is tried in sequence and the first one that
//! yields a non-empty result wins. Sites rename CSS classes often enough
//! that most extraction points carry at least one fallback expression.

use scraper::{ElementRef, Html, Selector};

/// Returns the trimmed text of the first non-empty match, if any
pub fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .find_map(|element| non_empty_text(&element))
}

/// Returns the trimmed text of every non-empty match, in document order
pub fn all_texts(document: &Html, selector: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|element| non_empty_text(&element))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Returns the named attribute of the first match that carries it non-empty
pub fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .find_map(|element| non_empty_attr(&element, attr))
}

/// Returns the named attribute of every match that carries it, in document order
pub fn all_attrs(document: &Html, selector: &str, attr: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|element| non_empty_attr(&element, attr))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Tries each selector in order; first non-empty text wins
pub fn first_text_of_any(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| first_text(document, selector))
}

/// Tries each selector in order; first selector with any attribute matches wins
pub fn all_attrs_of_any(document: &Html, selectors: &[&str], attr: &str) -> Vec<String> {
    for selector in selectors {
        let values = all_attrs(document, selector, attr);
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

/// Collects matching elements for callers that need to scope further queries
pub fn elements<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Returns the trimmed text of the first non-empty match within an element
pub fn first_text_in(element: &ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    element
        .select(&selector)
        .find_map(|child| non_empty_text(&child))
}

fn non_empty_text(element: &ElementRef) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn non_empty_attr(element: &ElementRef, attr: &str) -> Option<String> {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
