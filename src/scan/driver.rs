//! Scan orchestration.
//!
//! Sequence: validate config, open the feed, optionally count entries,
//! start the progress reporter, run the worker pool until the feed is
//! exhausted, stop the reporter, return the summary.
//!
//! # Interrupts
//!
//! A scan can be cut short with a shutdown future. When it fires, the feed
//! is closed so no new candidate is handed out, lookups already in flight
//! finish and are counted, and the summary is marked as interrupted.

use super::config::ScanConfig;
use super::counters::ScanCounters;
use super::feed::{count_entries, CandidateFeed};
use super::pool::{ScanSink, WorkerPool};
use super::progress::{self, ProgressHandle};
use crate::base::error::ScanError;
use crate::dns::Resolve;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Totals reported after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub domain: String,
    /// Candidates completed, success or failure
    pub processed: u64,
    /// Candidates that resolved
    pub found: u64,
    /// Entries counted before the scan, when progress display was on
    pub total: Option<u64>,
    /// Whether the scan stopped on a shutdown signal
    pub interrupted: bool,
    pub elapsed: Duration,
}

/// Runs scans for one [`ScanConfig`].
pub struct Scanner {
    config: ScanConfig,
    resolver: Arc<dyn Resolve>,
    pool: WorkerPool,
}

impl Scanner {
    /// Validates `config` and builds the resolution strategy it asks for.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        let resolver = config.build_resolver()?;
        Self::with_resolver(config, resolver)
    }

    /// Uses a caller-supplied resolution strategy instead of the one the
    /// config describes.
    pub fn with_resolver(config: ScanConfig, resolver: Arc<dyn Resolve>) -> Result<Self, ScanError> {
        config.validate()?;
        let pool = WorkerPool::new(config.concurrency, config.timeout)?;
        Ok(Self {
            config,
            resolver,
            pool,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn is_simulated(&self) -> bool {
        self.resolver.is_simulated()
    }

    /// Counts the wordlist (for progress), then scans it.
    ///
    /// Failing to open the wordlist is fatal. Failing to count it only
    /// disables the progress line.
    pub async fn scan_wordlist<F>(
        &self,
        path: impl AsRef<Path>,
        sink: Arc<dyn ScanSink>,
        shutdown: F,
    ) -> Result<ScanSummary, ScanError>
    where
        F: Future<Output = ()>,
    {
        let path = path.as_ref();
        let feed = CandidateFeed::open(path, &self.config.domain).await?;

        let total = if self.config.show_progress {
            match count_entries(path).await {
                Ok(total) => {
                    tracing::debug!(total, "counted wordlist entries");
                    Some(total)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Error counting wordlist lines");
                    None
                }
            }
        } else {
            None
        };

        if self.config.verbose {
            if let Some(total) = total {
                crate::output::print_block(&format!("Total wordlist entries: {total}"));
            }
        }

        self.scan_feed(feed, total, sink, shutdown).await
    }

    /// Scans an already-open feed.
    ///
    /// `total` enables the progress line when it is `Some` and non-zero and
    /// progress display is on. The summary reports the feed's domain,
    /// which need not match the configured one.
    pub async fn scan_feed<F>(
        &self,
        feed: CandidateFeed,
        total: Option<u64>,
        sink: Arc<dyn ScanSink>,
        shutdown: F,
    ) -> Result<ScanSummary, ScanError>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let domain = feed.domain().to_owned();
        let feed = Arc::new(feed);
        let counters = Arc::new(ScanCounters::new());

        tracing::info!(
            domain = %domain,
            workers = self.pool.concurrency(),
            simulated = self.is_simulated(),
            "scan started"
        );

        let progress = match total {
            Some(total) if total > 0 && self.config.show_progress => Some(ProgressHandle::spawn(
                Arc::clone(&counters),
                self.config.progress_interval,
                progress::stdout_bar(total),
            )),
            _ => None,
        };

        let run = self.pool.run(
            Arc::clone(&feed),
            Arc::clone(&self.resolver),
            Arc::clone(&counters),
            sink,
        );
        tokio::pin!(run);

        let (result, interrupted) = tokio::select! {
            result = &mut run => (result, false),
            () = shutdown => {
                tracing::warn!("interrupt received, finishing in-flight lookups");
                feed.close().await;
                (run.await, true)
            }
        };

        if let Some(progress) = progress {
            progress.stop().await;
        }
        result?;

        let snapshot = counters.snapshot();
        let summary = ScanSummary {
            domain,
            processed: snapshot.processed,
            found: snapshot.found,
            total,
            interrupted,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            processed = summary.processed,
            found = summary.found,
            interrupted,
            elapsed = ?summary.elapsed,
            "scan finished"
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("simulated", &self.resolver.is_simulated())
            .finish()
    }
}
