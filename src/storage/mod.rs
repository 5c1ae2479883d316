//! Storage module for harvested records
//!
//! This module handles:
//! - The in-memory deduplicating record store filled during a harvest
//! - Reading and writing record files (`id;name` rows, no header)

mod codec;
mod record_store;

pub use codec::{deserialize, load_records, read_records, save_records, write_records};
pub use record_store::RecordStore;
