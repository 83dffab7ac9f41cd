use std::io;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Public resolver used when none is configured.
pub const DEFAULT_DNS_SERVER: &str = "8.8.8.8:53";

#[derive(Debug, Error, Clone)]
pub enum ScanError {
    // Configuration Errors
    #[error("Concurrency level must be greater than 0")]
    InvalidConcurrency,
    #[error("Timeout must be greater than 0")]
    InvalidTimeout,
    #[error("Hit rate must be between {min} and {max}, got {value}")]
    InvalidHitRate { value: u32, min: u32, max: u32 },
    #[error("DNS server must be in format ip:port (e.g., 8.8.8.8:53), got '{0}'")]
    InvalidResolverAddress(String),
    #[error("Target domain must not be empty")]
    EmptyDomain,

    // Wordlist Errors
    #[error("Error opening wordlist file {path}: {source}")]
    WordlistOpen {
        path: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Error reading wordlist file {path}: {source}")]
    WordlistRead {
        path: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Error writing wordlist file {path}: {source}")]
    WordlistWrite {
        path: String,
        #[source]
        source: Arc<io::Error>,
    },

    // Resolution Errors
    #[error("{domain}: {reason}")]
    NameNotResolvedFor { domain: String, reason: String },
    #[error("{domain}: no addresses returned")]
    NoAddresses { domain: String },
    #[error("{domain}: lookup timed out after {timeout:?}")]
    LookupTimedOut { domain: String, timeout: Duration },

    // Pool Errors
    #[error("Worker task failed: {0}")]
    WorkerFailed(String),
}

impl ScanError {
    pub fn name_not_resolved(domain: impl Into<String>, reason: impl ToString) -> Self {
        ScanError::NameNotResolvedFor {
            domain: domain.into(),
            reason: reason.to_string(),
        }
    }

    pub fn wordlist_open(path: impl Into<String>, source: io::Error) -> Self {
        ScanError::WordlistOpen {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn wordlist_read(path: impl Into<String>, source: io::Error) -> Self {
        ScanError::WordlistRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn wordlist_write(path: impl Into<String>, source: io::Error) -> Self {
        ScanError::WordlistWrite {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Errors raised before any scanning starts because a flag or argument
    /// is unusable.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScanError::InvalidConcurrency
                | ScanError::InvalidTimeout
                | ScanError::InvalidHitRate { .. }
                | ScanError::InvalidResolverAddress(_)
                | ScanError::EmptyDomain
        )
    }

    /// Errors that describe a single failed lookup.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ScanError::NameNotResolvedFor { .. }
                | ScanError::NoAddresses { .. }
                | ScanError::LookupTimedOut { .. }
        )
    }
}
