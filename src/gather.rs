//! Fetch-then-post pipeline.
//!
//! [`Sifter`] owns the queue client and configuration; each call to
//! [`Sifter::gather`] runs one search, posts the results as one batch and
//! merges both outcomes into a [`Report`]. Nothing is cached between calls.

use crate::config::SifterConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::Report;
use crate::post::post;
use crate::queue::QueueClient;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Search-to-queue pipeline bound to one queue client.
#[derive(Debug)]
pub struct Sifter<Q> {
    queue: Q,
    config: SifterConfig,
}

impl<Q> Sifter<Q>
where
    Q: QueueClient,
{
    /// Bind a queue client and configuration together.
    pub fn new(queue: Q, config: SifterConfig) -> Self {
        Self { queue, config }
    }

    /// The queue client batches are sent through.
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Fetch articles matching `search` and post them to `queue_url`.
    ///
    /// `api_key` overrides the configured key. When neither is set this
    /// fails with [`crate::SifterError::MissingApiKey`] before any request
    /// is made. A failed fetch means nothing is posted.
    #[instrument(level = "info", skip_all, fields(%queue_url, %search, ?date_from))]
    pub async fn gather(
        &self,
        queue_url: &str,
        search: &str,
        date_from: Option<NaiveDate>,
        api_key: Option<&str>,
    ) -> Result<Report> {
        let t0 = Instant::now();
        let api_key = self.config.resolve_api_key(api_key)?;
        debug!(api_key = %crate::utils::redact(api_key), "Resolved API key");

        let fetcher = Fetcher::new(&self.config)?;
        let fetched = fetcher.fetch(api_key, search, date_from).await?;
        let batch = post(&self.queue, queue_url, &fetched).await?;

        let report = Report { fetched, batch };
        info!(
            fetched = report.fetched.len(),
            successful = report.batch.successful.len(),
            failed = report.batch.failed.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Gather complete"
        );
        Ok(report)
    }
}
