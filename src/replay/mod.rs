//! Replay module: record file → watched marks
//!
//! This module contains the write path:
//! - The GraphQL client behind the `MutationClient` trait
//! - The driver that walks a record list and marks each item watched

mod client;
mod driver;

pub use client::{GraphqlClient, MutationClient};
pub use driver::{replay, ReplayOutcome, ReplayedRecord};
