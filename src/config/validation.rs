use crate::config::types::{Config, MarkupConfig, PacingConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Largest listing page size the site accepts
const MAX_PAGE_SIZE: u32 = 200;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_pacing_config(&config.pacing)?;
    validate_markup_config(&config.markup)?;
    Ok(())
}

/// Validates a profile identifier before it is spliced into URL paths
pub fn validate_user_id(user_id: &str) -> Result<(), ConfigError> {
    if user_id.is_empty() {
        return Err(ConfigError::Validation("user id cannot be empty".to_string()));
    }

    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user id must contain only ASCII letters, digits, '-' or '_', got '{}'",
            user_id
        )));
    }

    Ok(())
}

/// Validates endpoints and request identity
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("graphql-url", &config.graphql_url)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_size < 1 || config.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "page-size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, config.page_size
        )));
    }

    Ok(())
}

fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.max_attempts == Some(0) {
        return Err(ConfigError::Validation(
            "max-attempts must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the class names used to find listing markup
fn validate_markup_config(config: &MarkupConfig) -> Result<(), ConfigError> {
    let named = [
        ("paging-class", &config.paging_class),
        ("listing-class", &config.listing_class),
        ("info-class", &config.info_class),
        ("name-class", &config.name_class),
    ];

    for (key, value) in named {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    if config.entry_classes.is_empty() {
        return Err(ConfigError::Validation(
            "entry-classes must list at least one class".to_string(),
        ));
    }

    if config.entry_classes.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "entry-classes cannot contain an empty class".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}
