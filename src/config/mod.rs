//! Configuration module for Kinoport
//!
//! Every setting has a default matching the live site, so a configuration
//! file is optional. When one is given it is loaded, parsed and validated
//! here.
//!
//! # Example
//!
//! ```no_run
//! use kinoport::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("kinoport.toml")).unwrap();
//! println!("Page delay: {}ms", config.pacing.page_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClassMatch, Config, MarkupConfig, PacingConfig, SourceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation entry points used outside the module
pub use validation::{validate, validate_user_id};
