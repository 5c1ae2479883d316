//! Pagination geometry
//!
//! The listing header reads like `"1—200 из 1234"`: the range of items shown
//! on the current page followed by the total count.

use thiserror::Error;

/// Separator between the shown range and the total ("of" in Russian)
const TOTAL_SEPARATOR: &str = " из ";

/// Dashes accepted between the first and last item number
const RANGE_DASHES: [char; 3] = ['—', '–', '-'];

/// Reasons a pagination marker could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagingParseError {
    #[error("no total separator in '{0}'")]
    MissingTotal(String),

    #[error("no range dash in '{0}'")]
    MissingRange(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("range {first}—{last} is empty")]
    EmptyRange { first: u64, last: u64 },

    #[error("range {first}—{last} is too wide")]
    RangeOverflow { first: u64, last: u64 },
}

/// Listing geometry derived from the first fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingState {
    pub total_items: u64,
    pub page_size: u64,
    pub page_count: u64,
}

impl PagingState {
    /// Builds the geometry, returning `None` for a zero page size
    pub fn new(total_items: u64, page_size: u64) -> Option<Self> {
        if page_size == 0 {
            return None;
        }

        Some(Self {
            total_items,
            page_size,
            page_count: page_count(total_items, page_size),
        })
    }
}

/// Number of pages needed to show `total_items` items, `page_size` per page
///
/// `page_size` must be non-zero.
pub fn page_count(total_items: u64, page_size: u64) -> u64 {
    total_items.div_ceil(page_size)
}

/// Reads `(total_items, page_size)` from the pagination marker text
///
/// # Example
///
/// ```
/// use kinoport::document::inspect_paging;
///
/// assert_eq!(inspect_paging("1—50 из 237"), Ok((237, 50)));
/// ```
pub fn inspect_paging(marker_text: &str) -> Result<(u64, u64), PagingParseError> {
    let normalized = marker_text.replace('\u{a0}', " ");
    let normalized = normalized.trim();

    let (range_part, total_part) = normalized
        .split_once(TOTAL_SEPARATOR)
        .ok_or_else(|| PagingParseError::MissingTotal(normalized.to_string()))?;

    let (first_part, last_part) = range_part
        .split_once(&RANGE_DASHES[..])
        .ok_or_else(|| PagingParseError::MissingRange(range_part.to_string()))?;

    let first = parse_count(first_part)?;
    let last = parse_count(last_part)?;
    let total = parse_count(total_part)?;

    if last < first {
        return Err(PagingParseError::EmptyRange { first, last });
    }

    let page_size = (last - first)
        .checked_add(1)
        .ok_or(PagingParseError::RangeOverflow { first, last })?;

    Ok((total, page_size))
}

/// Parses a non-negative integer, ignoring whitespace used as digit grouping
fn parse_count(segment: &str) -> Result<u64, PagingParseError> {
    let digits: String = segment.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PagingParseError::NotANumber(segment.trim().to_string()));
    }

    digits
        .parse()
        .map_err(|_| PagingParseError::NotANumber(segment.trim().to_string()))
}
