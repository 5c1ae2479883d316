//! Document module for reading listing pages
//!
//! This module turns a fetched profile page into domain values:
//! - A generic depth-first locator over document trees
//! - Pagination geometry from the "first—last из total" marker
//! - Watched-item records from the listing container
//!
//! HTML parsing itself is delegated to `scraper`. Nothing in here performs
//! I/O or keeps state between pages.

mod listing;
mod locator;
mod page;
mod paging;

pub use listing::{extract_id, extract_listing, Record};
pub use locator::{has_class, locate, TreeNode};
pub use page::{read_listing, read_paging, PageError};
pub use paging::{inspect_paging, page_count, PagingParseError, PagingState};

/// Class names used by the profile listing markup
pub mod markers {
    /// Element whose text reads "first—last из total"
    pub const PAGING_CLASS: &str = "pagesFromTo";

    /// Container holding one child per watched item
    pub const LISTING_CLASS: &str = "profileFilmsList";

    /// Plain and zebra-striped spellings of a listing entry
    pub const ENTRY_CLASSES: [&str; 2] = ["item", "item even"];

    /// Block inside an entry that carries the titles
    pub const INFO_CLASS: &str = "info";

    /// Block inside the info block wrapping the title link
    pub const NAME_CLASS: &str = "nameRus";
}
