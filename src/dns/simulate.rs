//! Network-free resolution for testing and demos.
//!
//! The simulator decides each outcome from the candidate name, a hit-rate
//! and a seed. No packet ever leaves the host.
//!
//! # Determinism
//!
//! Every candidate gets its own RNG, seeded from the scan seed mixed with a
//! stable hash of the name. The outcome for a name therefore does not depend
//! on which worker handles it or in what order, so two scans with the same
//! seed report the same set of names at any concurrency level.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::error::ScanError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::net::{IpAddr, Ipv4Addr};
use std::ops::Range;
use std::time::Duration;

/// Labels that real zones almost always carry.
///
/// A candidate whose first label is one of these resolves with
/// [`COMMON_HIT_RATE`] regardless of the configured hit-rate.
pub const COMMON_PREFIXES: &[&str] = &[
    "www", "mail", "ftp", "blog", "api", "dev", "staging", "test", "admin", "portal", "app",
    "secure",
];

/// Hit-rate (percent) applied to [`COMMON_PREFIXES`].
pub const COMMON_HIT_RATE: u8 = 90;

/// Default hit-rate (percent) for everything else.
pub const DEFAULT_HIT_RATE: u8 = 15;

/// Reported lookup time, in milliseconds, for common prefixes.
pub const COMMON_LATENCY_MS: Range<u64> = 50..250;

/// Reported lookup time, in milliseconds, for everything else.
pub const DEFAULT_LATENCY_MS: Range<u64> = 100..600;

// Keeps the latency draw independent of the outcome draw.
const LATENCY_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulated resolution strategy.
#[derive(Debug, Clone)]
pub struct SimulatedResolver {
    hit_rate: u8,
    seed: u64,
}

impl SimulatedResolver {
    /// Creates a simulator with a seed drawn from the OS.
    ///
    /// `hit_rate` is a percentage and is clamped to 100.
    pub fn new(hit_rate: u8) -> Self {
        Self::with_seed(hit_rate, rand::rng().random())
    }

    /// Creates a simulator whose outcomes are fixed by `seed`.
    pub fn with_seed(hit_rate: u8, seed: u64) -> Self {
        Self {
            hit_rate: hit_rate.min(100),
            seed,
        }
    }

    pub fn hit_rate(&self) -> u8 {
        self.hit_rate
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether `name` starts with one of the [`COMMON_PREFIXES`].
    pub fn is_common(name: &Name) -> bool {
        let label = name.first_label();
        name.as_str().len() > label.len()
            && COMMON_PREFIXES
                .iter()
                .any(|common| common.eq_ignore_ascii_case(label))
    }

    /// Decides the outcome for `name`. Pure in (seed, name, hit-rate).
    pub fn lookup(&self, name: &Name) -> Option<IpAddr> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ fnv1a(name.as_str()));
        let common = Self::is_common(name);
        let threshold = if common { COMMON_HIT_RATE } else { self.hit_rate };

        if rng.random_range(0..100u8) >= threshold {
            return None;
        }

        let addr = if common {
            Ipv4Addr::new(192, 168, rng.random_range(0..255), rng.random_range(1..=254))
        } else {
            Ipv4Addr::new(
                10,
                rng.random_range(0..255),
                rng.random_range(0..255),
                rng.random_range(1..=254),
            )
        };
        Some(IpAddr::V4(addr))
    }

    /// Made-up lookup time for `name`. Pure in (seed, name).
    pub fn latency(&self, name: &Name) -> Duration {
        let mut rng = StdRng::seed_from_u64(self.seed ^ fnv1a(name.as_str()) ^ LATENCY_SALT);
        let range = if Self::is_common(name) {
            COMMON_LATENCY_MS
        } else {
            DEFAULT_LATENCY_MS
        };
        Duration::from_millis(rng.random_range(range))
    }
}

impl Resolve for SimulatedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let answer = self.lookup(&name);
        Box::pin(async move {
            match answer {
                Some(addr) => {
                    tracing::debug!(domain = %name, %addr, "simulated hit");
                    Ok(Box::new(std::iter::once(addr)) as Addrs)
                }
                None => Err(ScanError::name_not_resolved(name.as_str(), "no such host")),
            }
        })
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn reported_latency(&self, name: &Name) -> Option<Duration> {
        Some(self.latency(name))
    }
}

/// 64-bit FNV-1a. Stable across platforms and toolchains.
fn fnv1a(input: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    input.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_vectors() {
        assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_is_common() {
        assert!(SimulatedResolver::is_common(&Name::new("www.example.com")));
        assert!(SimulatedResolver::is_common(&Name::new("MAIL.example.com")));
        assert!(!SimulatedResolver::is_common(&Name::new("wwww.example.com")));
        assert!(!SimulatedResolver::is_common(&Name::new("doesnotexist123.example.com")));
        // Needs a following label, not just the bare word
        assert!(!SimulatedResolver::is_common(&Name::new("www")));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let a = SimulatedResolver::with_seed(50, 7);
        let b = SimulatedResolver::with_seed(50, 7);
        for i in 0..200 {
            let name = Name::new(format!("host{i}.example.com"));
            assert_eq!(a.lookup(&name), b.lookup(&name));
        }
    }

    #[test]
    fn test_hit_rate_bounds() {
        let never = SimulatedResolver::with_seed(0, 1);
        let always = SimulatedResolver::with_seed(100, 1);
        for i in 0..500 {
            let name = Name::new(format!("node{i}.example.com"));
            assert!(never.lookup(&name).is_none());
            assert!(always.lookup(&name).is_some());
        }
    }

    #[test]
    fn test_hit_rate_is_clamped() {
        assert_eq!(SimulatedResolver::with_seed(250, 0).hit_rate(), 100);
    }

    #[test]
    fn test_address_ranges() {
        let sim = SimulatedResolver::with_seed(100, 3);
        for i in 0..100 {
            let other = sim.lookup(&Name::new(format!("svc{i}.example.com")));
            match other {
                Some(IpAddr::V4(v4)) => {
                    assert_eq!(v4.octets()[0], 10);
                    assert_ne!(v4.octets()[3], 0);
                }
                unexpected => panic!("unexpected answer {unexpected:?}"),
            }
        }
        for seed in 0..100 {
            let sim = SimulatedResolver::with_seed(0, seed);
            if let Some(IpAddr::V4(v4)) = sim.lookup(&Name::new("www.example.com")) {
                assert_eq!(&v4.octets()[..2], &[192, 168]);
            }
        }
    }

    #[test]
    fn test_latency_ranges() {
        for seed in 0..50 {
            let sim = SimulatedResolver::with_seed(15, seed);
            let common = sim.latency(&Name::new("www.example.com"));
            assert!((50..250).contains(&common.as_millis()), "{common:?}");

            let other = sim.latency(&Name::new(format!("svc{seed}.example.com")));
            assert!((100..600).contains(&other.as_millis()), "{other:?}");
        }

        let sim = SimulatedResolver::with_seed(15, 9);
        let name = Name::new("svc.example.com");
        assert_eq!(sim.latency(&name), sim.latency(&name));
        assert_eq!(sim.reported_latency(&name), Some(sim.latency(&name)));
    }

    #[tokio::test]
    async fn test_resolve_miss_reports_no_such_host() {
        let sim = SimulatedResolver::with_seed(0, 11);
        let err = sim
            .resolve(Name::new("doesnotexist123.example.com"))
            .await
            .err()
            .expect("hit-rate 0 never resolves");
        assert_eq!(err.to_string(), "doesnotexist123.example.com: no such host");
        assert!(sim.is_simulated());
    }
}
