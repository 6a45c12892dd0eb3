//! Runtime configuration.
//!
//! [`SifterConfig`] is built once by the caller and handed to the pipeline.
//! It can come from defaults, from environment variables, from a YAML file,
//! or any mix of the three; library code never reads process state itself.
//!
//! # YAML file
//!
//! ```yaml
//! api_key: your-guardian-key
//! api_base_url: https://content.guardianapis.com/search
//! request_timeout_secs: 5
//! aws_region: eu-west-2
//! ```
//!
//! Every field is optional.

use crate::error::{Result, SifterError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Environment variable holding the Guardian API key.
pub const API_KEY_VAR: &str = "GUARDIAN_API_KEY";
/// Environment variable holding the AWS region.
pub const REGION_VAR: &str = "AWS_REGION";
/// Default search endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://content.guardianapis.com/search";
/// Default bound on the search request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration shared by the fetcher and the orchestrator.
#[derive(Clone)]
pub struct SifterConfig {
    /// Guardian API key used when no key is passed to `gather` directly.
    pub api_key: Option<String>,
    /// Search endpoint, without a query string.
    pub api_base_url: String,
    /// Timeout applied to the search request.
    pub request_timeout: Duration,
    /// Region for the queue client; `None` defers to the AWS provider chain.
    pub aws_region: Option<String>,
}

impl Default for SifterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            aws_region: None,
        }
    }
}

impl std::fmt::Debug for SifterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SifterConfig")
            .field("api_key", &self.api_key.as_deref().map(crate::utils::redact))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("aws_region", &self.aws_region)
            .finish()
    }
}

/// On-disk shape of the YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    aws_region: Option<String>,
}

impl SifterConfig {
    /// Defaults overlaid with `GUARDIAN_API_KEY` and `AWS_REGION` from the environment.
    ///
    /// This is the only place the process environment is read.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SifterConfig::from_env`], with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty(API_KEY_VAR),
            aws_region: non_empty(REGION_VAR),
            ..Self::default()
        }
    }

    /// Load a YAML config file. Missing fields keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        debug!(?config, "Loaded config file");
        Ok(config)
    }

    /// Parse YAML config text. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: FileConfig = if text.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        let defaults = Self::default();
        let config = Self {
            api_key: file.api_key,
            api_base_url: file.api_base_url.unwrap_or(defaults.api_base_url),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            aws_region: file.aws_region,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can actually be used.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            SifterError::config(format!(
                "api_base_url {:?} is not a valid URL: {e}",
                self.api_base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SifterError::config(format!(
                "api_base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if url.query().is_some() {
            return Err(SifterError::config(
                "api_base_url must not carry a query string",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(SifterError::config("request timeout must be non-zero"));
        }
        Ok(())
    }

    /// Pick the API key: the explicit one if given, else the configured one.
    pub fn resolve_api_key<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        let non_blank = |key: &&str| !key.trim().is_empty();
        explicit
            .filter(non_blank)
            .or(self.api_key.as_deref().filter(non_blank))
            .ok_or(SifterError::MissingApiKey { var: API_KEY_VAR })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SifterConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_both_vars() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(API_KEY_VAR, "secret"), (REGION_VAR, "eu-west-2")]);
        let config = SifterConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.aws_region.as_deref(), Some("eu-west-2"));
    }

    #[test]
    fn test_from_lookup_treats_blank_as_unset() {
        let config = SifterConfig::from_lookup(|_| Some("  ".to_string()));
        assert!(config.api_key.is_none());
        assert!(config.aws_region.is_none());
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit() {
        let config = SifterConfig {
            api_key: Some("from-config".to_string()),
            ..SifterConfig::default()
        };
        assert_eq!(config.resolve_api_key(Some("explicit")).unwrap(), "explicit");
        assert_eq!(config.resolve_api_key(None).unwrap(), "from-config");
        assert_eq!(config.resolve_api_key(Some("  ")).unwrap(), "from-config");
        assert_eq!(config.resolve_api_key(Some("")).unwrap(), "from-config");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let config = SifterConfig::default();
        let err = config.resolve_api_key(None).unwrap_err();
        assert!(matches!(err, SifterError::MissingApiKey { var: API_KEY_VAR }));

        let blank = SifterConfig {
            api_key: Some(" ".to_string()),
            ..SifterConfig::default()
        };
        assert!(blank.resolve_api_key(Some("")).is_err());
    }

    #[test]
    fn test_yaml_partial_file() {
        let config = SifterConfig::from_yaml_str("request_timeout_secs: 12\n").unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_yaml_empty_is_default() {
        let config = SifterConfig::from_yaml_str("").unwrap();
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let err = SifterConfig::from_yaml_str("page_size: 50\n").unwrap_err();
        assert!(matches!(err, SifterError::Yaml(_)));
    }

    #[test]
    fn test_yaml_zero_timeout_rejected() {
        let err = SifterConfig::from_yaml_str("request_timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, SifterError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        for bad in ["not a url", "ftp://example.com/search", "https://example.com/search?x=1"] {
            let config = SifterConfig {
                api_base_url: bad.to_string(),
                ..SifterConfig::default()
            };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: abc123\naws_region: eu-west-1").unwrap();
        let config = SifterConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.aws_region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SifterConfig {
            api_key: Some("supersecretkey".to_string()),
            ..SifterConfig::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("supersecretkey"));
        assert!(shown.contains("supe****"));
    }
}
