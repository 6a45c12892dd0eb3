//! Guardian content search client.
//!
//! Issues one search request and projects each hit onto an [`Article`].
//!
//! # Query layout
//!
//! Parameters are concatenated in a fixed order and the search term is
//! embedded as given, quotes and all:
//!
//! ```text
//! {base}?from-date=2024-01-01&q="climate change"&order-by=newest&show-fields=body&api-key={key}
//! ```
//!
//! `from-date` is left out entirely when no date is given.

use crate::config::SifterConfig;
use crate::error::{Result, SifterError};
use crate::models::{Article, SearchEnvelope};
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Most results the search API returns on one page.
pub const PAGE_SIZE: usize = 10;

/// Build the full search URL.
pub fn build_query(
    base_url: &str,
    api_key: &str,
    search: &str,
    date_from: Option<NaiveDate>,
) -> String {
    let mut query = format!("{base_url}?");
    if let Some(date) = date_from {
        query.push_str(&format!("from-date={}&", date.format("%Y-%m-%d")));
    }
    query.push_str(&format!(
        "q={search}&order-by=newest&show-fields=body&api-key={api_key}"
    ));
    query
}

/// Parse a raw search response body into at most [`PAGE_SIZE`] articles.
pub fn parse_results(body: &str) -> Result<Vec<Article>> {
    let envelope: SearchEnvelope = serde_json::from_str(body).map_err(|e| {
        warn!(
            error = %e,
            response_preview = %truncate_for_log(body, 300),
            "Search response did not match the expected shape"
        );
        SifterError::Parse(e)
    })?;

    Ok(envelope
        .response
        .results
        .into_iter()
        .take(PAGE_SIZE)
        .map(Article::from_result)
        .collect())
}

/// Client for the search endpoint.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Fetcher {
    /// Build a fetcher whose requests are bounded by `config.request_timeout`.
    pub fn new(config: &SifterConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Fetch up to [`PAGE_SIZE`] of the newest articles matching `search`.
    ///
    /// # Errors
    ///
    /// - [`SifterError::Http`] on connection failure, timeout or a non-2xx status
    /// - [`SifterError::Parse`] when the response is not the expected JSON shape
    ///
    /// Nothing is retried.
    #[instrument(level = "info", skip_all, fields(%search, ?date_from))]
    pub async fn fetch(
        &self,
        api_key: &str,
        search: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<Vec<Article>> {
        let t0 = Instant::now();
        let query = build_query(&self.base_url, api_key, search, date_from);

        let response = self.client.get(&query).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received search response");

        let articles = parse_results(&body)?;
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched articles"
        );
        Ok(articles)
    }
}
