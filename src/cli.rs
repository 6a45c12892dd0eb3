//! Command-line interface definitions for graun_sifter.
//!
//! Global options can be given as flags, through environment variables, or
//! in a YAML config file. Precedence: flags, then `GUARDIAN_API_KEY` /
//! `AWS_REGION` (read by [`SifterConfig::from_env`]), then the file.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use graun_sifter::{Result, SifterConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for graun_sifter.
///
/// # Examples
///
/// ```sh
/// # Fetch the newest matches and post them
/// graun_sifter gather https://sqs.eu-west-2.amazonaws.com/123/articles '"big picture"'
///
/// # Only articles published on or after a date
/// graun_sifter gather https://sqs.eu-west-2.amazonaws.com/123/articles magcon 2023-01-01
///
/// # Re-post saved fetch output
/// graun_sifter post https://sqs.eu-west-2.amazonaws.com/123/articles fetched.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Guardian API key [env: GUARDIAN_API_KEY]
    #[arg(long, global = true)]
    pub guardian_api_key: Option<String>,

    /// AWS region for the SQS client [env: AWS_REGION]
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Override the search endpoint
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Search request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch matching articles and post them to the queue
    Gather {
        /// URL of the target SQS queue
        queue_url: String,
        /// Search term, passed to the API as given
        search: String,
        /// Only fetch articles published on or after this date (YYYY-MM-DD)
        date_from: Option<NaiveDate>,
    },
    /// Post articles from a JSON file without fetching
    Post {
        /// URL of the target SQS queue
        queue_url: String,
        /// JSON array of articles
        messages_file: PathBuf,
    },
}

impl Cli {
    /// Assemble the runtime config from the file, the process environment and flags.
    pub fn sifter_config(&self) -> Result<SifterConfig> {
        self.sifter_config_with_env(SifterConfig::from_env())
    }

    /// Like [`Cli::sifter_config`], taking the environment layer as given.
    pub fn sifter_config_with_env(&self, env: SifterConfig) -> Result<SifterConfig> {
        let mut config = match &self.config {
            Some(path) => SifterConfig::from_yaml_file(path)?,
            None => SifterConfig::default(),
        };
        if env.api_key.is_some() {
            config.api_key = env.api_key;
        }
        if env.aws_region.is_some() {
            config.aws_region = env.aws_region;
        }
        if let Some(key) = &self.guardian_api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(region) = &self.region {
            config.aws_region = Some(region.clone());
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }
}
