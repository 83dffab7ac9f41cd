//! Fixed-size worker pool.
//!
//! `concurrency` tasks share one [`CandidateFeed`]. Each task pulls the next
//! candidate, probes it, reports it, and bumps the counters, until the feed
//! runs dry. An idle worker always takes the next unclaimed candidate, so
//! the load balances itself without work stealing.
//!
//! Completion order across candidates is unspecified. Counter totals are
//! not: every candidate taken from the feed is counted exactly once.

use super::counters::ScanCounters;
use super::feed::CandidateFeed;
use crate::base::error::ScanError;
use crate::dns::{probe, Name, ResolutionOutcome, Resolve};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Receives per-candidate results as workers produce them.
///
/// Called concurrently from every worker; implementations must not block.
pub trait ScanSink: Send + Sync {
    /// A candidate resolved. Called immediately, before counters move.
    fn on_found(&self, name: &Name, outcome: &ResolutionOutcome);

    /// Every probed candidate, resolved or not. Defaults to a no-op.
    fn on_probed(&self, _name: &Name, _outcome: &ResolutionOutcome) {}

    /// Whether results can no longer be delivered (stdout closed, say).
    /// Workers stop taking new candidates once this turns true.
    fn is_closed(&self) -> bool {
        false
    }
}

/// A bounded set of concurrent resolution workers.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    concurrency: usize,
    timeout: Duration,
}

impl WorkerPool {
    /// Creates a pool of `concurrency` workers, each lookup bounded by
    /// `timeout`.
    pub fn new(concurrency: usize, timeout: Duration) -> Result<Self, ScanError> {
        if concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }
        if timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        Ok(Self {
            concurrency,
            timeout,
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs every worker to completion.
    ///
    /// Returns once the feed is exhausted (or closed) and every worker has
    /// finished its in-flight lookup. A panicking worker does not stop the
    /// others; the first failure is returned after the join.
    pub async fn run(
        &self,
        feed: Arc<CandidateFeed>,
        resolver: Arc<dyn Resolve>,
        counters: Arc<ScanCounters>,
        sink: Arc<dyn ScanSink>,
    ) -> Result<(), ScanError> {
        let mut workers = JoinSet::new();
        for id in 0..self.concurrency {
            workers.spawn(worker(
                id,
                Arc::clone(&feed),
                Arc::clone(&resolver),
                Arc::clone(&counters),
                Arc::clone(&sink),
                self.timeout,
            ));
        }
        tracing::debug!(workers = self.concurrency, "worker pool started");

        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "worker task failed");
                failure.get_or_insert(ScanError::WorkerFailed(e.to_string()));
            }
        }

        tracing::debug!("worker pool drained");
        failure.map_or(Ok(()), Err)
    }
}

async fn worker(
    id: usize,
    feed: Arc<CandidateFeed>,
    resolver: Arc<dyn Resolve>,
    counters: Arc<ScanCounters>,
    sink: Arc<dyn ScanSink>,
    timeout: Duration,
) {
    let mut handled = 0u64;
    while let Some(name) = feed.next().await {
        let outcome = probe(&*resolver, &name, timeout).await;
        sink.on_probed(&name, &outcome);
        if outcome.is_resolved() {
            sink.on_found(&name, &outcome);
        }
        counters.record(outcome.is_resolved());
        handled += 1;
        if sink.is_closed() {
            feed.close().await;
        }
    }
    tracing::trace!(worker = id, handled, "worker finished");
}
