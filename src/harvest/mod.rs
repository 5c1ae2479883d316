//! Harvest module: profile listing → record store
//!
//! This module contains the read path, including:
//! - HTTP page fetching behind the `PageSource` trait
//! - The fetch-until-nonempty retry loop
//! - Profile listing URL construction
//! - The harvest session that probes paging and walks every page

mod fetcher;
mod retry;
mod session;
mod urls;

pub use fetcher::{build_http_client, HttpPageSource, PageSource};
pub use retry::{fetch_with_retry, FetchAttempt, Retried, RetryPolicy};
pub use session::{HarvestOutcome, HarvestReport, Harvester};
pub use urls::ProfileUrls;
