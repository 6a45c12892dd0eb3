//! # graun_sifter
//!
//! Fetches the newest Guardian articles matching a search term and forwards
//! them to an SQS queue as a single batch, returning one combined report.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: one GET against the content search endpoint ([`fetch`])
//! 2. **Post**: up to ten articles sent as one batch ([`post`])
//! 3. **Report**: fetched articles merged with the queue's response ([`gather`])
//!
//! ```ignore
//! let config = SifterConfig::from_env();
//! let queue = SqsQueue::from_region(config.aws_region.clone()).await;
//! let sifter = Sifter::new(queue, config);
//! let report = sifter.gather(queue_url, "\"big picture\"", None, None).await?;
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod gather;
pub mod models;
pub mod post;
pub mod queue;
pub mod utils;

pub use config::SifterConfig;
pub use error::{Result, SifterError};
pub use fetch::Fetcher;
pub use gather::Sifter;
pub use models::{Article, BatchEntry, BatchResponse, Report};
pub use queue::{QueueClient, SqsQueue};
