//! Replay driver
//!
//! Records are marked watched one at a time, in file order, with a pause
//! between calls. A rejected or failed call is reported and skipped over. A
//! record whose id is not a number stops the whole run, since the file is
//! then not one this tool wrote.

use crate::document::Record;
use crate::pacing::Pacer;
use crate::replay::MutationClient;
use crate::{KinoportError, Result};
use std::time::Duration;

/// What happened to a single replayed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The remote side confirmed the mark
    Watched,

    /// The call went through but the mark was not accepted
    Rejected,

    /// The call itself failed
    Failed(String),
}

impl ReplayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Watched)
    }
}

/// A record together with its replay outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayedRecord {
    pub record: Record,
    pub outcome: ReplayOutcome,
}

/// Marks every record watched, in order
///
/// Prints one line per record. Pauses `delay` between consecutive calls.
///
/// # Returns
///
/// * `Ok(Vec<ReplayedRecord>)` - Every record was attempted
/// * `Err(KinoportError::MalformedRecord)` - A non-numeric id stopped the run;
///   records before it have already been replayed
pub async fn replay(
    records: &[Record],
    client: &dyn MutationClient,
    pacer: &dyn Pacer,
    delay: Duration,
) -> Result<Vec<ReplayedRecord>> {
    let mut replayed = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id: u64 = record
            .id
            .parse()
            .map_err(|_| KinoportError::MalformedRecord {
                row: index + 1,
                id: record.id.clone(),
            })?;

        if index > 0 {
            pacer.pause(delay).await;
        }

        let outcome = match client.set_watched(id).await {
            Ok(true) => ReplayOutcome::Watched,
            Ok(false) => ReplayOutcome::Rejected,
            Err(e) => ReplayOutcome::Failed(e.to_string()),
        };

        match &outcome {
            ReplayOutcome::Watched => {
                tracing::info!("Item {} marked watched", id);
                println!("{} set watched", record.name);
            }
            ReplayOutcome::Rejected => {
                tracing::info!("Item {} not accepted", id);
                println!("{} not set watched", record.name);
            }
            ReplayOutcome::Failed(reason) => {
                tracing::warn!("Item {} failed: {}", id, reason);
                println!("{} not set watched", record.name);
            }
        }

        replayed.push(ReplayedRecord {
            record: record.clone(),
            outcome,
        });
    }

    Ok(replayed)
}
