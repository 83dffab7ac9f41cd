//! Command-line arguments for the `subenum` binary.

use crate::base::error::{ScanError, DEFAULT_DNS_SERVER};
use crate::dns::DEFAULT_HIT_RATE;
use crate::scan::ScanConfig;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "subenum",
    author,
    disable_version_flag = true,
    about = "Enumerate subdomains by resolving wordlist entries under a target domain",
    long_about = "Enumerate subdomains by resolving wordlist entries under a target domain.\n\n\
                  Only scan domains you own or have explicit permission to test."
)]
pub struct Args {
    /// Target domain to enumerate subdomains of
    #[arg(required_unless_present = "version")]
    pub domain: Option<String>,

    /// Path to the wordlist file
    #[arg(short = 'w', long = "wordlist", required_unless_present = "version")]
    pub wordlist: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short = 't', long = "threads", default_value_t = 100)]
    pub concurrency: usize,

    /// DNS lookup timeout in milliseconds
    #[arg(long = "timeout", default_value_t = 1000)]
    pub timeout_ms: u64,

    /// DNS server to use (format: ip:port)
    #[arg(long = "dns-server", default_value = DEFAULT_DNS_SERVER)]
    pub dns_server: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show progress during scanning
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub progress: bool,

    /// Run in simulation mode without actual DNS queries (for testing)
    #[arg(long)]
    pub simulate: bool,

    /// In simulation mode, percentage of subdomains that will 'resolve' (1-100)
    #[arg(long = "hit-rate", default_value_t = u32::from(DEFAULT_HIT_RATE))]
    pub hit_rate: u32,

    /// In simulation mode, fix the random seed so results are reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show version information and exit
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Args {
    /// Wordlist path; empty only when `--version` was given instead.
    pub fn wordlist(&self) -> &Path {
        self.wordlist.as_deref().unwrap_or(Path::new(""))
    }

    /// Validate the flags and turn them into a [`ScanConfig`].
    pub fn into_config(&self) -> Result<ScanConfig, ScanError> {
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }
        if self.timeout_ms == 0 {
            return Err(ScanError::InvalidTimeout);
        }
        let hit_rate = u8::try_from(self.hit_rate)
            .ok()
            .filter(|rate| (1..=100).contains(rate))
            .ok_or(ScanError::InvalidHitRate {
                value: self.hit_rate,
                min: 1,
                max: 100,
            })?;

        let mut config = ScanConfig::new(self.domain.as_deref().unwrap_or_default().trim())
            .concurrency(self.concurrency)
            .timeout(Duration::from_millis(self.timeout_ms))
            .resolver(self.dns_server.clone())
            .verbose(self.verbose)
            .show_progress(self.progress);

        if self.simulate {
            config = config.simulate(hit_rate);
            if let Some(seed) = self.seed {
                config = config.seed(seed);
            }
        } else if self.seed.is_some() {
            tracing::warn!("--seed only applies with --simulate; ignoring it");
        }

        config.validate()?;
        Ok(config)
    }
}
