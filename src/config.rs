//! TOML configuration for exhaustive verification runs.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! threads = 12
//! chunk_size = 1000000
//! sieve_limit = 10000000000
//! certainty = 50
//! report_interval_secs = 30
//! join_timeout_secs = 86400
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

pub const DEFAULT_THREADS: usize = 12;
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;
pub const DEFAULT_SIEVE_LIMIT: u64 = 10_000_000_000;
pub const DEFAULT_CERTAINTY: u32 = 50;
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 30;
/// Largest accepted sieve bound (2^40, about 68 GB of bits).
pub const MAX_SIEVE_LIMIT: u64 = 1 << 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Fixed worker pool size, independent of the core count.
    pub threads: usize,
    /// Values per claimed chunk.
    pub chunk_size: u64,
    /// Inclusive bound of the sieve oracle; 0 disables the sieve.
    pub sieve_limit: u64,
    /// Repetitions for the probabilistic oracle.
    pub certainty: u32,
    pub report_interval_secs: u64,
    /// Coordinator gives up (and cancels workers) after this long.
    pub join_timeout_secs: Option<u64>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        VerifyConfig {
            threads: DEFAULT_THREADS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sieve_limit: DEFAULT_SIEVE_LIMIT,
            certainty: DEFAULT_CERTAINTY,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            join_timeout_secs: None,
        }
    }
}

impl VerifyConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: VerifyConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.threads == 0 {
            return Err(VerifyError::InvalidConfig("threads must be >= 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(VerifyError::InvalidConfig("chunk_size must be >= 1".into()));
        }
        if self.sieve_limit > MAX_SIEVE_LIMIT {
            return Err(VerifyError::InvalidConfig(format!(
                "sieve_limit must be <= {}",
                MAX_SIEVE_LIMIT
            )));
        }
        if self.certainty == 0 {
            return Err(VerifyError::InvalidConfig("certainty must be >= 1".into()));
        }
        if self.join_timeout_secs == Some(0) {
            return Err(VerifyError::InvalidConfig(
                "join_timeout_secs must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs.max(1))
    }

    pub fn join_timeout(&self) -> Option<Duration> {
        self.join_timeout_secs.map(Duration::from_secs)
    }
}
