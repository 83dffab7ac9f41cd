//! Timed lookups folded into a boolean outcome.
//!
//! [`probe`] is the single place where a lookup's success or failure is
//! decided. Every error (timeout, NXDOMAIN, network failure) becomes an
//! unresolved outcome; the error text is kept for diagnostics only.

use super::{Name, Resolve};
use crate::base::error::ScanError;
use std::{
    net::IpAddr,
    time::{Duration, Instant},
};

/// Result of probing one candidate.
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    /// First address returned, when the name resolved.
    pub address: Option<IpAddr>,
    /// Time spent on the lookup, including a timeout if one fired.
    /// Simulated lookups carry a made-up figure instead.
    pub elapsed: Duration,
    /// Why the name did not resolve.
    pub error: Option<ScanError>,
}

impl ResolutionOutcome {
    pub fn resolved(address: IpAddr, elapsed: Duration) -> Self {
        Self {
            address: Some(address),
            elapsed,
            error: None,
        }
    }

    pub fn unresolved(error: ScanError, elapsed: Duration) -> Self {
        Self {
            address: None,
            elapsed,
            error: Some(error),
        }
    }

    /// True iff the lookup completed and yielded at least one address.
    pub fn is_resolved(&self) -> bool {
        self.address.is_some()
    }
}

/// Resolves `name` with `resolver`, giving up after `timeout`.
pub async fn probe<R>(resolver: &R, name: &Name, timeout: Duration) -> ResolutionOutcome
where
    R: Resolve + ?Sized,
{
    let start = Instant::now();
    let result = tokio::time::timeout(timeout, resolver.resolve(name.clone())).await;
    let elapsed = resolver
        .reported_latency(name)
        .unwrap_or_else(|| start.elapsed());

    match result {
        Ok(Ok(mut addrs)) => match addrs.next() {
            Some(address) => ResolutionOutcome::resolved(address, elapsed),
            None => ResolutionOutcome::unresolved(
                ScanError::NoAddresses {
                    domain: name.to_string(),
                },
                elapsed,
            ),
        },
        Ok(Err(error)) => ResolutionOutcome::unresolved(error, elapsed),
        Err(_) => {
            tracing::debug!(domain = %name, ?timeout, "lookup timed out");
            ResolutionOutcome::unresolved(
                ScanError::LookupTimedOut {
                    domain: name.to_string(),
                    timeout,
                },
                elapsed,
            )
        }
    }
}
