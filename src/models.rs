//! Data models for fetched articles, queue batches and the final report.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`Article`]: the four-field record produced by the fetcher and sent as a message body
//! - [`SearchEnvelope`] and friends: typed view of the search API JSON
//! - [`BatchEntry`]: one message in a batch submission
//! - [`BatchResponse`]: what the queue service reports back
//! - [`Report`]: fetched articles plus the queue response
//!
//! Wire names are camelCase for articles (what downstream consumers read out
//! of the queue) and PascalCase for queue responses (what the SQS API uses).

use crate::utils::take_chars;
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from an article body.
pub const PREVIEW_CHARS: usize = 1000;

/// An article as fetched from the search API.
///
/// Produced by the fetcher and never modified afterwards. Order follows the
/// API's newest-first ordering; there is no identity beyond that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// ISO-8601 publication timestamp, e.g. `2025-01-05T07:00:14Z`.
    pub web_publication_date: String,
    /// Headline.
    pub web_title: String,
    /// Public URL of the article.
    pub web_url: String,
    /// First [`PREVIEW_CHARS`] characters of the article body.
    pub content_preview: String,
}

impl Article {
    /// Project a raw search result onto the four-field article shape.
    pub fn from_result(result: SearchResult) -> Self {
        let content_preview = take_chars(&result.fields.body, PREVIEW_CHARS).to_string();
        Self {
            web_publication_date: result.web_publication_date,
            web_title: result.web_title,
            web_url: result.web_url,
            content_preview,
        }
    }
}

/// Top-level JSON envelope returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchPage,
}

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
}

/// A single search hit. Only the keys the fetcher projects are declared;
/// everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub web_publication_date: String,
    pub web_title: String,
    pub web_url: String,
    pub fields: ResultFields,
}

/// The `show-fields` block of a search hit.
#[derive(Debug, Deserialize)]
pub struct ResultFields {
    pub body: String,
}

/// One message in a batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// `{YYYYMMDDTHHMMSS}_{index}`
    pub id: String,
    /// Compact JSON of the article.
    pub body: String,
}

/// An entry the queue service accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSuccess {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "MessageId")]
    pub message_id: String,
    #[serde(rename = "MD5OfMessageBody")]
    pub md5_of_message_body: String,
}

/// An entry the queue service rejected within an otherwise accepted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "SenderFault")]
    pub sender_fault: bool,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Call-level metadata for a batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(rename = "RequestId", skip_serializing_if = "Option::is_none", default)]
    pub request_id: Option<String>,
    #[serde(rename = "HTTPStatusCode")]
    pub http_status_code: u16,
}

/// The queue service's answer to one batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(rename = "Successful", default)]
    pub successful: Vec<BatchSuccess>,
    #[serde(rename = "Failed", default)]
    pub failed: Vec<BatchFailure>,
    #[serde(rename = "ResponseMetadata")]
    pub response_metadata: ResponseMetadata,
}

/// Everything one `gather` run produced.
///
/// Serializes as a single flat object: `Fetched` alongside the keys of the
/// queue response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Fetched")]
    pub fetched: Vec<Article>,
    #[serde(flatten)]
    pub batch: BatchResponse,
}

impl Report {
    /// Number of entries the queue service reported on, accepted or not.
    pub fn delivered_count(&self) -> usize {
        self.batch.successful.len() + self.batch.failed.len()
    }
}
