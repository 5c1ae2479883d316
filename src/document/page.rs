//! Whole-page readers
//!
//! These parse a fetched body and apply the locator plus the relevant
//! extractor. The parsed document never outlives the call, so callers can
//! hold the result across `.await` points.

use crate::config::MarkupConfig;
use crate::document::listing::{extract_listing, Record};
use crate::document::locator::{has_class, locate};
use crate::document::paging::{inspect_paging, PagingParseError, PagingState};
use scraper::Html;
use thiserror::Error;

/// Reasons a fetched page yielded nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no element with class '{0}'")]
    MarkerNotFound(String),

    #[error("unreadable pagination marker: {0}")]
    Paging(#[from] PagingParseError),

    #[error("pagination marker reports an empty page size")]
    ZeroPageSize,
}

/// Reads the listing geometry from a page body
pub fn read_paging(body: &str, markup: &MarkupConfig) -> Result<PagingState, PageError> {
    let document = Html::parse_document(body);

    let marker = locate(document.root_element(), |el| {
        has_class(el, &markup.paging_class, markup.class_match)
    })
    .ok_or_else(|| PageError::MarkerNotFound(markup.paging_class.clone()))?;

    let text = marker.text().collect::<String>();
    let (total_items, page_size) = inspect_paging(&text)?;

    PagingState::new(total_items, page_size).ok_or(PageError::ZeroPageSize)
}

/// Reads every record from the listing container of a page body
pub fn read_listing(body: &str, markup: &MarkupConfig) -> Result<Vec<Record>, PageError> {
    let document = Html::parse_document(body);

    let container = locate(document.root_element(), |el| {
        has_class(el, &markup.listing_class, markup.class_match)
    })
    .ok_or_else(|| PageError::MarkerNotFound(markup.listing_class.clone()))?;

    Ok(extract_listing(container, markup))
}
