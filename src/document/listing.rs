//! Listing extraction
//!
//! Each watched item is rendered as
//! `entry > info > nameRus > a[href="/film/<id>/"]`, with the title as the
//! link text.

use crate::config::MarkupConfig;
use crate::document::locator::{has_class, TreeNode};
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// A single watched item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// External identifier of the item on the site
    pub id: String,

    /// Human readable title, not necessarily unique
    pub name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Extracts one record per well-formed entry among the container's children
///
/// Only direct children are considered. Children that are not entries, or
/// entries missing part of the expected structure, are skipped without
/// error. Records come back in document order.
pub fn extract_listing(container: ElementRef<'_>, markup: &MarkupConfig) -> Vec<Record> {
    container
        .child_nodes()
        .into_iter()
        .filter(|child| is_entry(child, markup))
        .filter_map(|entry| extract_entry(entry, markup))
        .collect()
}

fn is_entry(element: &ElementRef<'_>, markup: &MarkupConfig) -> bool {
    markup
        .entry_classes
        .iter()
        .any(|class| has_class(element, class, markup.class_match))
}

/// Follows entry → info → name block → first linked anchor
fn extract_entry(entry: ElementRef<'_>, markup: &MarkupConfig) -> Option<Record> {
    let anchor = entry
        .child_nodes()
        .into_iter()
        .filter(|c| has_class(c, &markup.info_class, markup.class_match))
        .flat_map(|info| info.child_nodes())
        .filter(|c| has_class(c, &markup.name_class, markup.class_match))
        .flat_map(|name| name.child_nodes())
        .find(|c| c.value().name() == "a" && c.value().attr("href").is_some())?;

    let href = anchor.value().attr("href")?;
    let id = extract_id(href)?;

    let name = anchor.text().collect::<String>();
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some(Record::new(id, name))
}

/// Pulls the item identifier out of a link target
///
/// The identifier is normally the third `/`-separated segment
/// (`/film/535341/` gives `535341`). Targets spelling out an `id` segment
/// (`/film/type/1/id/535341/...`) use the segment after it instead.
///
/// # Example
///
/// ```
/// use kinoport::document::extract_id;
///
/// assert_eq!(extract_id("/film/535341/").as_deref(), Some("535341"));
/// assert_eq!(extract_id("/film/type/1/id/535341/somepath/").as_deref(), Some("535341"));
/// ```
pub fn extract_id(href: &str) -> Option<String> {
    let segments: Vec<&str> = href.split('/').collect();

    let explicit = segments
        .windows(2)
        .find(|pair| pair[0] == "id")
        .map(|pair| pair[1]);

    let id = explicit.or_else(|| segments.get(2).copied())?;
    if id.is_empty() {
        return None;
    }

    Some(id.to_string())
}
