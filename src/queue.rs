//! Message queue client abstraction.
//!
//! - [`QueueClient`]: the one operation the batch poster needs
//! - [`SqsQueue`]: implementation over the AWS SDK's SQS client
//!
//! The trait keeps the poster independent of the SDK so it can be driven by
//! an in-memory queue in tests.

use crate::error::{Result, SifterError};
use crate::models::{BatchEntry, BatchFailure, BatchResponse, BatchSuccess, ResponseMetadata};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::operation::RequestId;
use aws_sdk_sqs::operation::send_message_batch::SendMessageBatchOutput;
use aws_sdk_sqs::types::SendMessageBatchRequestEntry;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A queue service that accepts messages in batches.
#[allow(async_fn_in_trait)]
pub trait QueueClient {
    /// Submit `entries` to the queue at `queue_url` in a single call.
    ///
    /// Returns the per-entry outcome. Rejected entries inside an accepted
    /// call are reported in [`BatchResponse::failed`], not as an error.
    async fn send_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<BatchEntry>,
    ) -> Result<BatchResponse>;
}

/// [`QueueClient`] backed by Amazon SQS.
#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: aws_sdk_sqs::Client,
}

impl SqsQueue {
    /// Wrap an already configured SDK client.
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }

    /// Build a client for `region`, falling back to the SDK's default
    /// region chain (profile, IMDS, ...) when it is `None`.
    #[instrument(level = "info")]
    pub async fn from_region(region: Option<String>) -> Self {
        let region_provider =
            RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;
        match shared.region() {
            Some(r) => info!(region = %r, "SQS client configured"),
            None => warn!("No AWS region resolved; SQS calls will fail"),
        }
        Self::new(aws_sdk_sqs::Client::new(&shared))
    }
}

impl QueueClient for SqsQueue {
    #[instrument(level = "info", skip_all, fields(%queue_url, entries = entries.len()))]
    async fn send_message_batch(
        &self,
        queue_url: &str,
        entries: Vec<BatchEntry>,
    ) -> Result<BatchResponse> {
        let t0 = Instant::now();
        let sdk_entries = entries
            .into_iter()
            .map(|entry| {
                SendMessageBatchRequestEntry::builder()
                    .id(entry.id)
                    .message_body(entry.body)
                    .build()
                    .map_err(|e| SifterError::Queue(Box::new(e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .send_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(sdk_entries))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "SendMessageBatch call failed");
                SifterError::Queue(Box::new(aws_sdk_sqs::Error::from(e)))
            })?;

        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "SendMessageBatch returned"
        );
        Ok(response_from_output(&output))
    }
}

/// Convert the SDK output into the crate's response shape.
///
/// A decoded output implies the service answered 2xx, so the status is
/// recorded as 200.
fn response_from_output(output: &SendMessageBatchOutput) -> BatchResponse {
    let successful = output
        .successful()
        .iter()
        .map(|s| BatchSuccess {
            id: s.id().to_string(),
            message_id: s.message_id().to_string(),
            md5_of_message_body: s.md5_of_message_body().to_string(),
        })
        .collect();
    let failed = output
        .failed()
        .iter()
        .map(|f| BatchFailure {
            id: f.id().to_string(),
            sender_fault: f.sender_fault(),
            code: f.code().to_string(),
            message: f.message().map(str::to_string),
        })
        .collect();

    BatchResponse {
        successful,
        failed,
        response_metadata: ResponseMetadata {
            request_id: output.request_id().map(str::to_string),
            http_status_code: 200,
        },
    }
}
