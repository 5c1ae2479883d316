//! Harvest session - walks every listing page of a profile
//!
//! A session:
//! - Probes the first page until it reports a non-zero total
//! - Derives the page count from the reported geometry
//! - Fetches each page until it yields at least one record
//! - Merges everything into a single deduplicating store
//!
//! The store belongs to the session and is handed back when it finishes, so
//! two sessions never share records.

use crate::config::{Config, MarkupConfig};
use crate::document::{read_listing, read_paging, PagingState, Record};
use crate::harvest::retry::{fetch_with_retry, FetchAttempt, Retried, RetryPolicy};
use crate::harvest::{PageSource, ProfileUrls};
use crate::pacing::Pacer;
use crate::storage::RecordStore;
use crate::Result;
use std::time::Duration;

/// Counters describing a finished harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    /// Geometry reported by the first page
    pub paging: PagingState,

    /// Records extracted over all pages, duplicates included
    pub parsed_items: usize,

    /// Distinct records in the final store
    pub stored_items: usize,

    /// Fetches spent, probe included
    pub total_attempts: u32,
}

/// Result of a finished harvest
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub store: RecordStore,
    pub report: HarvestReport,
}

/// One harvest of one profile
pub struct Harvester<'a> {
    source: &'a dyn PageSource,
    pacer: &'a dyn Pacer,
    urls: ProfileUrls,
    markup: MarkupConfig,
    retry: RetryPolicy,
    page_delay: Duration,
    store: RecordStore,
}

impl<'a> Harvester<'a> {
    /// Creates a session for `user_id` with an empty store
    ///
    /// # Arguments
    ///
    /// * `source` - Where page bodies come from
    /// * `pacer` - Performs page and retry delays
    /// * `config` - Endpoints, pacing and markup settings
    /// * `user_id` - Profile whose listing is harvested
    pub fn new(
        source: &'a dyn PageSource,
        pacer: &'a dyn Pacer,
        config: &Config,
        user_id: &str,
    ) -> Result<Self> {
        let urls = ProfileUrls::new(&config.source.base_url, user_id, config.source.page_size)?;

        Ok(Self {
            source,
            pacer,
            urls,
            markup: config.markup.clone(),
            retry: RetryPolicy::from_config(&config.pacing),
            page_delay: config.pacing.page_delay(),
            store: RecordStore::new(),
        })
    }

    /// Runs the harvest to completion
    ///
    /// Only returns an error when a bounded retry policy runs out of
    /// attempts (or a page URL cannot be built). With the default unbounded
    /// policy a page that never renders keeps the session waiting forever.
    pub async fn run(mut self) -> Result<HarvestOutcome> {
        let probe = self.probe_paging().await?;
        let paging = probe.value;
        let mut total_attempts = probe.attempts;

        tracing::info!(
            "Watched items: {}, page size: {}, pages: {}",
            paging.total_items,
            paging.page_size,
            paging.page_count
        );

        let mut parsed_items = 0;

        for page in 1..=paging.page_count {
            self.pacer.pause(self.page_delay).await;

            let fetched = self.harvest_page(page).await?;
            total_attempts += fetched.attempts;

            tracing::info!(
                "Page {}/{}: parsed {} items",
                page,
                paging.page_count,
                fetched.value.len()
            );

            parsed_items += fetched.value.len();
            self.store.merge(fetched.value);
        }

        let report = HarvestReport {
            paging,
            parsed_items,
            stored_items: self.store.len(),
            total_attempts,
        };

        tracing::info!(
            "Harvest finished: {} parsed, {} distinct",
            report.parsed_items,
            report.stored_items
        );

        Ok(HarvestOutcome {
            store: self.store,
            report,
        })
    }

    /// Fetches the first page until it reports a non-zero total
    async fn probe_paging(&self) -> Result<Retried<PagingState>> {
        let url = self.urls.first_page()?;
        let target = format!("metadata page {}", url);
        let (url, source, markup) = (&url, self.source, &self.markup);

        fetch_with_retry(&self.retry, self.pacer, &target, move |_| async move {
            let body = match source.fetch_page(url).await {
                Ok(body) => body,
                Err(e) => return FetchAttempt::TransientFailure(e.to_string()),
            };

            match read_paging(&body, markup) {
                Ok(paging) if paging.total_items > 0 => FetchAttempt::Success(paging),
                Ok(_) => FetchAttempt::TransientFailure("listing reports zero items".to_string()),
                Err(e) => FetchAttempt::TransientFailure(e.to_string()),
            }
        })
        .await
    }

    /// Fetches one listing page until it yields at least one record
    async fn harvest_page(&self, page: u64) -> Result<Retried<Vec<Record>>> {
        let url = self.urls.page(page)?;
        let target = format!("page {}", url);
        let (url, source, markup) = (&url, self.source, &self.markup);

        fetch_with_retry(&self.retry, self.pacer, &target, move |_| async move {
            let body = match source.fetch_page(url).await {
                Ok(body) => body,
                Err(e) => return FetchAttempt::TransientFailure(e.to_string()),
            };

            match read_listing(&body, markup) {
                Ok(records) if !records.is_empty() => FetchAttempt::Success(records),
                Ok(_) => FetchAttempt::TransientFailure("no items parsed".to_string()),
                Err(e) => FetchAttempt::TransientFailure(e.to_string()),
            }
        })
        .await
    }
}
