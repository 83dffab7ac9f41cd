//! # subenum
//!
//! Subdomain enumeration by DNS brute force.
//!
//! `subenum` joins every wordlist entry to a target domain and checks
//! whether the result resolves, using a bounded pool of concurrent workers.
//! Found names are reported the moment they resolve, with an optional
//! periodic progress bar.
//!
//! ## Features
//!
//! - **Streaming Feed**: The wordlist is read lazily, one line per idle worker
//! - **Bounded Concurrency**: Fixed worker count; no unbounded queues
//! - **Pluggable Resolution**: Live DNS via hickory-dns, or seeded simulation
//! - **Deterministic Simulation**: Same seed, same results, at any concurrency
//! - **Graceful Interrupts**: In-flight lookups drain before the summary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use subenum::output::ConsoleSink;
//! use subenum::scan::{ScanConfig, Scanner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::new("example.com").simulate(15).seed(42);
//!     let scanner = Scanner::new(config).unwrap();
//!     let summary = scanner
//!         .scan_wordlist("words.txt", Arc::new(ConsoleSink::new(true, false)), std::future::pending())
//!         .await
//!         .unwrap();
//!     println!("{} of {} resolved", summary.found, summary.processed);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and IO context helpers
//! - [`dns`] - Resolution strategies (live, simulated) and the timed probe
//! - [`scan`] - Candidate feed, worker pool, counters, progress, driver
//! - [`output`] - Console sink, banners, summary
//! - [`cli`] - Command-line flags
//! - [`wordlist`] - Wordlist generation
//!
//! ## Legal
//!
//! Only scan domains you own or have explicit permission to test.

pub mod base;
pub mod cli;
pub mod dns;
pub mod logging;
pub mod output;
pub mod scan;
pub mod wordlist;
