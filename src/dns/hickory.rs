//! Live DNS resolution using hickory-dns.
//!
//! Unlike a system resolver, this one is pinned to a single upstream
//! server so a scan never depends on `/etc/resolv.conf`. Queries go out
//! over UDP with one attempt each; a failed lookup is not retried.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::error::ScanError;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfig, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::xfer::Protocol,
    TokioResolver,
};
use std::{net::IpAddr, net::SocketAddr, sync::Arc, time::Duration};

/// Async DNS resolver bound to one upstream server.
///
/// Cloning is cheap; clones share the underlying hickory resolver and its
/// connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use subenum::dns::{HickoryResolver, Name, Resolve};
///
/// let resolver = HickoryResolver::new("1.1.1.1:53".parse()?, Duration::from_secs(1));
/// let addrs = resolver.resolve(Name::new("www.example.com")).await?;
/// ```
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioResolver>,
    upstream: SocketAddr,
}

impl HickoryResolver {
    /// Creates a resolver that sends every query to `upstream`.
    ///
    /// `timeout` bounds each individual query to the upstream server.
    pub fn new(upstream: SocketAddr, timeout: Duration) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(upstream, Protocol::Udp));

        let mut options = ResolverOpts::default();
        options.timeout = timeout;
        options.attempts = 1;
        // Host lookup semantics: A and AAAA together
        options.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(options)
                .build();

        tracing::debug!(upstream = %upstream, ?timeout, "built hickory resolver");

        Self {
            resolver: Arc::new(resolver),
            upstream,
        }
    }

    /// The upstream server queries are sent to.
    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }
}

impl std::fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryResolver")
            .field("upstream", &self.upstream)
            .finish_non_exhaustive()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                ScanError::name_not_resolved(domain, e)
            })?;

            let addrs: Vec<IpAddr> = lookup.iter().collect();

            if addrs.is_empty() {
                return Err(ScanError::NoAddresses {
                    domain: domain.to_string(),
                });
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "hickory-dns resolution complete");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}
