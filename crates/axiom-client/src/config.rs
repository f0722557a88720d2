//! Client configuration: TOML file plus `AXIOM_*` environment overlay.
//!
//! ```toml
//! base_url = "https://api.axiomhive.com/v1"
//! timeout_secs = 30
//! api_version = "1.0.0"
//! max_proof_age_secs = 300
//! # max_future_skew_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use axiom_core::FreshnessPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.axiomhive.com/v1";

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this shape.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File path, or `<inline>`.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A value is out of range or malformed.
    #[error("invalid config value for {key}: {message}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Settings for [`crate::AxiomClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    /// Transport timeout in seconds.
    pub timeout_secs: u64,
    /// API version this client speaks.
    pub api_version: String,
    /// Proofs at least this old are rejected.
    pub max_proof_age_secs: u64,
    /// When set, proofs dated further than this in the future are rejected.
    pub max_future_skew_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            api_version: "1.0.0".to_string(),
            max_proof_age_secs: 300,
            max_future_skew_secs: None,
        }
    }
}

impl ClientConfig {
    /// Loads a TOML file, applies environment overrides, and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file without applying overrides.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_toml(&contents, path)
    }

    /// Parses TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(contents, Path::new("<inline>"))
    }

    fn parse_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies `AXIOM_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("AXIOM_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("AXIOM_TIMEOUT_SECS") {
            self.timeout_secs = parse_secs("AXIOM_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("AXIOM_MAX_PROOF_AGE_SECS") {
            self.max_proof_age_secs = parse_secs("AXIOM_MAX_PROOF_AGE_SECS", &v)?;
        }
        if let Some(v) = lookup("AXIOM_MAX_FUTURE_SKEW_SECS") {
            self.max_future_skew_secs = Some(parse_secs("AXIOM_MAX_FUTURE_SKEW_SECS", &v)?);
        }
        Ok(self)
    }

    /// Rejects values the client cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid {
                key: "base_url",
                message: "must not be empty".into(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "base_url",
                message: format!("'{base}' is not an http(s) URL"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                message: "must be greater than zero".into(),
            });
        }
        if self.max_proof_age_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "max_proof_age_secs",
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn endpoint(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Proof freshness policy derived from this config.
    pub fn freshness_policy(&self) -> FreshnessPolicy {
        FreshnessPolicy::new(
            secs(self.max_proof_age_secs),
            self.max_future_skew_secs.map(secs),
        )
    }
}

fn secs(value: u64) -> chrono::Duration {
    chrono::Duration::seconds(i64::try_from(value).unwrap_or(i64::MAX).min(i64::MAX / 1_000))
}

fn parse_secs(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        message: format!("'{raw}' is not a whole number of seconds"),
    })
}
