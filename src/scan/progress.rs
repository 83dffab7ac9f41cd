//! Periodic progress bar.
//!
//! The reporter is a read-only observer: it samples [`ScanCounters`] on a
//! fixed interval and pushes the sample into an [`indicatif::ProgressBar`].
//! It never touches the pool. It runs until [`ProgressHandle::stop`] is
//! awaited, which guarantees no tick lands after the caller moves on to the
//! summary.

use super::counters::ScanCounters;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// `{msg}` carries the found count.
pub const PROGRESS_TEMPLATE: &str = "Progress: {percent}% ({pos}/{len}) | Found: {msg}";

pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_TEMPLATE).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "bad progress template, using default");
        ProgressStyle::default_bar()
    })
}

/// A bar of length `total` drawn on stdout.
pub fn stdout_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
    bar.set_style(progress_style());
    bar.set_message("0");
    bar
}

/// Handle to a running reporter task.
#[derive(Debug)]
pub struct ProgressHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    /// Starts sampling `counters` into `bar` every `interval`.
    ///
    /// The first sample lands one interval after the start.
    pub fn spawn(counters: Arc<ScanCounters>, interval: Duration, bar: ProgressBar) -> Self {
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(report(counters, interval, bar, stopped));
        Self { stop, task }
    }

    /// Stops the reporter and waits for the bar to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "progress reporter failed");
        }
    }
}

fn sample(counters: &ScanCounters, bar: &ProgressBar) {
    let snapshot = counters.snapshot();
    bar.set_message(snapshot.found.to_string());
    bar.set_position(snapshot.processed);
}

async fn report(
    counters: Arc<ScanCounters>,
    interval: Duration,
    bar: ProgressBar,
    mut stopped: oneshot::Receiver<()>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stopped => {
                sample(&counters, &bar);
                bar.finish();
                return;
            }
            _ = ticker.tick() => sample(&counters, &bar),
        }
    }
}
