use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Kinoport
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub pacing: PacingConfig,
    pub markup: MarkupConfig,
}

/// Remote endpoints and request identity
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Site root the profile pages hang off
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// GraphQL endpoint accepting the set-watched mutation
    #[serde(rename = "graphql-url")]
    pub graphql_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Listing page size requested through the first-page URL
    #[serde(rename = "page-size")]
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.kinopoisk.ru".to_string(),
            graphql_url: "https://graphql.kinopoisk.ru/graphql/?operationName=MovieSetWatched"
                .to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                .to_string(),
            page_size: 200,
        }
    }
}

/// Delays between remote calls and the retry bound
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause before each listing page fetch (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Pause between failed attempts on the same page (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Pause after each replayed record (milliseconds)
    #[serde(rename = "replay-delay-ms")]
    pub replay_delay_ms: u64,

    /// Maximum attempts per page; `None` retries forever
    #[serde(rename = "max-attempts")]
    pub max_attempts: Option<u32>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 5000,
            retry_delay_ms: 5000,
            replay_delay_ms: 1000,
            max_attempts: None,
        }
    }
}

impl PacingConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn replay_delay(&self) -> Duration {
        Duration::from_millis(self.replay_delay_ms)
    }
}

/// How a class attribute is compared against a wanted class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassMatch {
    /// Every token of the wanted name must appear among the attribute's tokens
    #[default]
    Token,

    /// The attribute value merely has to contain the wanted name.
    /// Kept for markup that only matched under the old permissive test.
    Substring,
}

/// Class names identifying the interesting parts of a listing page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    #[serde(rename = "class-match")]
    pub class_match: ClassMatch,

    /// Element holding the "first—last из total" text
    #[serde(rename = "paging-class")]
    pub paging_class: String,

    /// Container whose children are the listing entries
    #[serde(rename = "listing-class")]
    pub listing_class: String,

    /// Accepted spellings of an entry (plain and zebra-striped)
    #[serde(rename = "entry-classes")]
    pub entry_classes: Vec<String>,

    #[serde(rename = "info-class")]
    pub info_class: String,

    #[serde(rename = "name-class")]
    pub name_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        use crate::document::markers;

        Self {
            class_match: ClassMatch::default(),
            paging_class: markers::PAGING_CLASS.to_string(),
            listing_class: markers::LISTING_CLASS.to_string(),
            entry_classes: markers::ENTRY_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            info_class: markers::INFO_CLASS.to_string(),
            name_class: markers::NAME_CLASS.to_string(),
        }
    }
}
