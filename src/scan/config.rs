//! Scan configuration.

use crate::base::error::{ScanError, DEFAULT_DNS_SERVER};
use crate::dns::{HickoryResolver, Resolve, SimulatedResolver, DEFAULT_HIT_RATE};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Where resolution outcomes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Real lookups against the configured resolver.
    #[default]
    Live,
    /// Fabricated outcomes; no network I/O.
    Simulated {
        /// Percent chance (0-100) that a non-common candidate resolves.
        hit_rate: u8,
        /// Fixes every outcome when set.
        seed: Option<u64>,
    },
}

/// Immutable settings for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target domain candidates are built under
    pub domain: String,
    /// Per-lookup timeout
    pub timeout: Duration,
    /// Number of concurrent workers
    pub concurrency: usize,
    /// Upstream resolver, `ip:port`
    pub resolver: String,
    /// Live or simulated lookups
    pub mode: ResolutionMode,
    /// Per-lookup diagnostics and a final summary
    pub verbose: bool,
    /// Periodic progress line
    pub show_progress: bool,
    /// Interval between progress lines
    pub progress_interval: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            timeout: Duration::from_millis(1000),
            concurrency: 100,
            resolver: DEFAULT_DNS_SERVER.to_string(),
            mode: ResolutionMode::Live,
            verbose: false,
            show_progress: true,
            progress_interval: Duration::from_secs(2),
        }
    }
}

impl ScanConfig {
    /// Create a config for `domain` with defaults.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Set the per-lookup timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of workers.
    pub fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    /// Set the upstream resolver (`ip:port`).
    pub fn resolver(mut self, addr: impl Into<String>) -> Self {
        self.resolver = addr.into();
        self
    }

    /// Switch to simulated lookups with the given hit-rate.
    pub fn simulate(mut self, hit_rate: u8) -> Self {
        let seed = match self.mode {
            ResolutionMode::Simulated { seed, .. } => seed,
            ResolutionMode::Live => None,
        };
        self.mode = ResolutionMode::Simulated { hit_rate, seed };
        self
    }

    /// Fix the simulation seed. Switches to simulation if needed.
    pub fn seed(mut self, seed: u64) -> Self {
        let hit_rate = match self.mode {
            ResolutionMode::Simulated { hit_rate, .. } => hit_rate,
            ResolutionMode::Live => DEFAULT_HIT_RATE,
        };
        self.mode = ResolutionMode::Simulated {
            hit_rate,
            seed: Some(seed),
        };
        self
    }

    /// Enable or disable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable the progress line.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the progress interval.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.mode, ResolutionMode::Simulated { .. })
    }

    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.domain.trim().is_empty() {
            return Err(ScanError::EmptyDomain);
        }
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        match self.mode {
            ResolutionMode::Simulated { hit_rate, .. } if hit_rate > 100 => {
                Err(ScanError::InvalidHitRate {
                    value: u32::from(hit_rate),
                    min: 0,
                    max: 100,
                })
            }
            ResolutionMode::Simulated { .. } => Ok(()),
            ResolutionMode::Live => parse_resolver_address(&self.resolver).map(|_| ()),
        }
    }

    /// Build the resolution strategy this config asks for.
    pub fn build_resolver(&self) -> Result<Arc<dyn Resolve>, ScanError> {
        let resolver: Arc<dyn Resolve> = match self.mode {
            ResolutionMode::Simulated {
                hit_rate,
                seed: Some(seed),
            } => Arc::new(SimulatedResolver::with_seed(hit_rate, seed)),
            ResolutionMode::Simulated { hit_rate, seed: None } => {
                Arc::new(SimulatedResolver::new(hit_rate))
            }
            ResolutionMode::Live => Arc::new(HickoryResolver::new(
                parse_resolver_address(&self.resolver)?,
                self.timeout,
            )),
        };
        Ok(resolver)
    }
}

/// Parse an `ip:port` resolver address.
///
/// IPv6 servers need brackets: `[2001:4860:4860::8888]:53`.
pub fn parse_resolver_address(addr: &str) -> Result<SocketAddr, ScanError> {
    if !addr.contains(':') {
        return Err(ScanError::InvalidResolverAddress(addr.to_string()));
    }
    addr.trim()
        .parse::<SocketAddr>()
        .map_err(|_| ScanError::InvalidResolverAddress(addr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(1000));
        assert_eq!(config.concurrency, 100);
        assert_eq!(config.resolver, "8.8.8.8:53");
        assert_eq!(config.mode, ResolutionMode::Live);
        assert!(config.show_progress);
        assert!(!config.verbose);
        assert_eq!(config.progress_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ScanConfig::new("example.com")
            .timeout(Duration::from_millis(250))
            .concurrency(8)
            .simulate(40)
            .seed(99)
            .verbose(true);

        assert_eq!(config.domain, "example.com");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.concurrency, 8);
        assert_eq!(
            config.mode,
            ResolutionMode::Simulated {
                hit_rate: 40,
                seed: Some(99)
            }
        );
        assert!(config.verbose);
    }

    #[test]
    fn test_seed_before_simulate_keeps_seed() {
        let config = ScanConfig::new("example.com").seed(5).simulate(70);
        assert_eq!(
            config.mode,
            ResolutionMode::Simulated {
                hit_rate: 70,
                seed: Some(5)
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let base = ScanConfig::new("example.com");
        assert!(matches!(
            base.clone().concurrency(0).validate(),
            Err(ScanError::InvalidConcurrency)
        ));
        assert!(matches!(
            base.clone().timeout(Duration::ZERO).validate(),
            Err(ScanError::InvalidTimeout)
        ));
        assert!(matches!(
            ScanConfig::new("  ").validate(),
            Err(ScanError::EmptyDomain)
        ));
        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_validate_hit_rate_range() {
        let config = ScanConfig::new("example.com").simulate(101);
        assert!(matches!(
            config.validate(),
            Err(ScanError::InvalidHitRate { value: 101, .. })
        ));
        assert!(ScanConfig::new("example.com").simulate(0).validate().is_ok());
        assert!(ScanConfig::new("example.com").simulate(100).validate().is_ok());
    }

    #[test]
    fn test_resolver_address_only_checked_live() {
        let live = ScanConfig::new("example.com").resolver("nodots");
        assert!(matches!(
            live.validate(),
            Err(ScanError::InvalidResolverAddress(_))
        ));

        let simulated = live.simulate(15);
        assert!(simulated.validate().is_ok());
    }

    #[test]
    fn test_parse_resolver_address() {
        assert!(parse_resolver_address("8.8.8.8:53").is_ok());
        assert!(parse_resolver_address("[2001:4860:4860::8888]:53").is_ok());
        assert!(parse_resolver_address("nodots").is_err());
        assert!(parse_resolver_address("8.8.8.8").is_err());
        assert!(parse_resolver_address(":53").is_err());
        assert!(parse_resolver_address("1.1.1.1:99999").is_err());
        assert!(parse_resolver_address("256.1.1.1:53").is_err());
    }

    #[tokio::test]
    async fn test_build_resolver_matches_mode() {
        let simulated = ScanConfig::new("example.com").simulate(15).build_resolver().unwrap();
        assert!(simulated.is_simulated());

        let live = ScanConfig::new("example.com").build_resolver().unwrap();
        assert!(!live.is_simulated());
    }
}
