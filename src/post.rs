//! Batch poster: turns articles into queue messages and submits them at once.
//!
//! # Entry ids
//!
//! Every entry in a call shares one prefix taken from the UTC clock when the
//! call starts, followed by the article's zero-based position:
//!
//! ```text
//! 20250105T070014_0, 20250105T070014_1, ...
//! ```
//!
//! The numeric suffix lines up with the index of the article in the
//! `Fetched` list of the final report.

use crate::error::{Result, SifterError};
use crate::models::{Article, BatchEntry, BatchResponse};
use crate::queue::QueueClient;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Queue service limit on entries per batch call.
pub const MAX_BATCH: usize = 10;

/// Format the shared id prefix, `YYYYMMDDTHHMMSS`.
pub fn batch_id_prefix(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%S").to_string()
}

/// Build one entry per article, keeping only the first [`MAX_BATCH`].
///
/// Bodies are compact JSON; non-ASCII text is written as-is.
pub fn build_entries(prefix: &str, messages: &[Article]) -> Result<Vec<BatchEntry>> {
    messages
        .iter()
        .take(MAX_BATCH)
        .enumerate()
        .map(|(i, message)| {
            Ok(BatchEntry {
                id: format!("{prefix}_{i}"),
                body: serde_json::to_string(message).map_err(SifterError::Serialization)?,
            })
        })
        .collect()
}

/// Read a JSON array of articles, e.g. saved output of an earlier fetch.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_messages_file(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let messages: Vec<Article> = serde_json::from_str(&text).map_err(SifterError::Parse)?;
    debug!(count = messages.len(), "Loaded messages file");
    Ok(messages)
}

/// Send up to [`MAX_BATCH`] articles to the queue at `queue_url` in one call.
///
/// Articles past the first ten are dropped. The slice is only borrowed, so
/// the caller's data is untouched. The queue's response is returned as-is;
/// entries it rejects show up in [`BatchResponse::failed`].
#[instrument(level = "info", skip_all, fields(%queue_url, messages = messages.len()))]
pub async fn post<Q>(queue: &Q, queue_url: &str, messages: &[Article]) -> Result<BatchResponse>
where
    Q: QueueClient,
{
    let t0 = Instant::now();
    let prefix = batch_id_prefix(Utc::now());

    if messages.len() > MAX_BATCH {
        warn!(
            given = messages.len(),
            sent = MAX_BATCH,
            "Too many messages for one batch; dropping the tail"
        );
    }

    let entries = build_entries(&prefix, messages)?;
    let sent = entries.len();
    let response = queue.send_message_batch(queue_url, entries).await?;

    info!(
        sent,
        successful = response.successful.len(),
        failed = response.failed.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Posted batch"
    );
    for failure in &response.failed {
        warn!(id = %failure.id, code = %failure.code, sender_fault = failure.sender_fault, "Entry rejected by queue");
    }
    Ok(response)
}
