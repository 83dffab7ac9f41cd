//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the resolution strategy layer.

use crate::base::error::ScanError;
use std::{fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc, time::Duration};

/// A fully-qualified candidate name to resolve.
///
/// This is a lightweight wrapper around a hostname string. Candidates are
/// built by joining a wordlist prefix to the target domain with a `.`.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// Builds the candidate `prefix.domain`.
    pub fn candidate(prefix: &str, domain: &str) -> Self {
        Self::new(format!("{prefix}.{domain}"))
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    /// The leftmost label (`www` for `www.example.com`).
    ///
    /// Returns the whole name when it contains no `.`.
    pub fn first_label(&self) -> &str {
        self.host
            .split_once('.')
            .map_or(&*self.host, |(label, _)| label)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over resolved addresses.
pub type Addrs = Box<dyn Iterator<Item = IpAddr> + Send>;

/// Alias for the `Future` type returned by a resolution strategy.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, ScanError>> + Send>>;

/// A pluggable resolution strategy.
///
/// The worker pool only ever talks to this trait, so live DNS and the
/// simulator drive identical concurrency logic. Implementations must be
/// thread-safe; resolution takes `&self` so every worker can share one
/// instance behind an `Arc`.
///
/// Timeouts are applied by the caller (see [`probe`](super::probe)), so an
/// implementation may run for as long as its backend needs.
pub trait Resolve: Send + Sync {
    /// Resolves a candidate name to its addresses.
    ///
    /// An `Ok` carrying no addresses is treated as "not resolved".
    fn resolve(&self, name: Name) -> Resolving;

    /// Whether outcomes are fabricated rather than looked up.
    fn is_simulated(&self) -> bool {
        false
    }

    /// Lookup time to report for `name` in place of the measured one.
    ///
    /// `None` (the default) reports wall time.
    fn reported_latency(&self, _name: &Name) -> Option<Duration> {
        None
    }
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }

    fn is_simulated(&self) -> bool {
        (**self).is_simulated()
    }

    fn reported_latency(&self, name: &Name) -> Option<Duration> {
        (**self).reported_latency(name)
    }
}
