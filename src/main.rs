//! # graun_sifter
//!
//! Command-line entry point: loads `.env`, sets up logging, builds the SQS
//! client and runs one subcommand. The resulting report is printed to stdout
//! as JSON; logs go to stderr.
//!
//! ## Usage
//!
//! ```sh
//! graun_sifter gather <QUEUE_URL> <SEARCH> [DATE_FROM]
//! graun_sifter post <QUEUE_URL> <MESSAGES_FILE>
//! ```

use clap::Parser;
use graun_sifter::post::{post, read_messages_file};
use graun_sifter::{QueueClient, Sifter, SifterConfig, SqsQueue};
use std::error::Error;
use std::future::Future;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Before reading config, so values from .env are visible to it
    let dotenv_path = dotenvy::dotenv().ok();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    debug!(?dotenv_path, "Environment loaded");

    let args = Cli::parse();
    let config = args.sifter_config()?;
    debug!(?config, "Resolved configuration");

    let output = run(args.command, config, SqsQueue::from_region).await?;
    println!("{output}");

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");
    Ok(())
}

/// Run one subcommand and return the JSON to print.
///
/// The queue client is only built once the command's own configuration has
/// been checked, since resolving an AWS region can itself hit the network.
#[instrument(level = "info", skip_all)]
async fn run<Q, F, Fut>(
    command: Command,
    config: SifterConfig,
    make_queue: F,
) -> Result<String, Box<dyn Error>>
where
    Q: QueueClient,
    F: FnOnce(Option<String>) -> Fut,
    Fut: Future<Output = Q>,
{
    match command {
        Command::Gather {
            queue_url,
            search,
            date_from,
        } => {
            config.resolve_api_key(None)?;
            let queue = make_queue(config.aws_region.clone()).await;
            let sifter = Sifter::new(queue, config);
            let report = sifter.gather(&queue_url, &search, date_from, None).await?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Command::Post {
            queue_url,
            messages_file,
        } => {
            let messages = read_messages_file(&messages_file)?;
            let queue = make_queue(config.aws_region.clone()).await;
            let response = post(&queue, &queue_url, &messages).await?;
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graun_sifter::{BatchEntry, BatchResponse, SifterError};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct UnusedQueue;

    impl QueueClient for UnusedQueue {
        async fn send_message_batch(
            &self,
            _queue_url: &str,
            _entries: Vec<BatchEntry>,
        ) -> graun_sifter::Result<BatchResponse> {
            unreachable!("no batch should be sent")
        }
    }

    #[tokio::test]
    async fn test_gather_without_key_never_builds_queue() {
        let cli = Cli::parse_from(["graun_sifter", "gather", "q-url", "magcon"]);
        let config = cli
            .sifter_config_with_env(SifterConfig::default())
            .unwrap();
        let built = AtomicBool::new(false);

        let err = run(cli.command, config, |_region| {
            built.store(true, Ordering::SeqCst);
            async { UnusedQueue }
        })
        .await
        .unwrap_err();

        assert!(!built.load(Ordering::SeqCst));
        let err = err.downcast::<SifterError>().unwrap();
        assert!(matches!(*err, SifterError::MissingApiKey { .. }));
    }

    #[tokio::test]
    async fn test_post_missing_file_never_builds_queue() {
        let cli = Cli::parse_from(["graun_sifter", "post", "q-url", "/nonexistent/fetched.json"]);
        let built = AtomicBool::new(false);

        let err = run(cli.command, SifterConfig::default(), |_region| {
            built.store(true, Ordering::SeqCst);
            async { UnusedQueue }
        })
        .await
        .unwrap_err();

        assert!(!built.load(Ordering::SeqCst));
        let err = err.downcast::<SifterError>().unwrap();
        assert!(matches!(*err, SifterError::Io(_)));
    }
}
