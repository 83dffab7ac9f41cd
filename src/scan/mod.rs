//! Concurrent resolution engine.
//!
//! - [`CandidateFeed`]: wordlist lines as `prefix.domain` names, pulled lazily
//! - [`WorkerPool`]: `concurrency` workers probing candidates from the feed
//! - [`ScanCounters`]: atomic processed/found totals
//! - [`ProgressHandle`]: cancellable periodic progress bar
//! - [`Scanner`]: wires the above together for one [`ScanConfig`]

pub mod config;
pub mod counters;
pub mod driver;
pub mod feed;
pub mod pool;
pub mod progress;

pub use config::{parse_resolver_address, ResolutionMode, ScanConfig};
pub use counters::{CounterSnapshot, ScanCounters};
pub use driver::{ScanSummary, Scanner};
pub use feed::{count_entries, CandidateFeed};
pub use pool::{ScanSink, WorkerPool};
pub use progress::{stdout_bar, ProgressHandle};
