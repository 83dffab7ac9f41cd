//! DNS Resolution Module
//!
//! Provides the pluggable resolution strategy used by the worker pool:
//! - Live lookups through hickory-dns, pinned to one upstream server
//! - Seeded, network-free simulation
//! - [`probe`]: timeout handling and folding into [`ResolutionOutcome`]
//!
//! # Example
//!
//! ```rust,ignore
//! use subenum::dns::{probe, Name, SimulatedResolver};
//!
//! let resolver = SimulatedResolver::with_seed(15, 42);
//! let outcome = probe(&resolver, &Name::candidate("www", "example.com"), timeout).await;
//! if outcome.is_resolved() {
//!     println!("Found: www.example.com");
//! }
//! ```

mod hickory;
mod probe;
mod resolve;
mod simulate;

pub use hickory::HickoryResolver;
pub use probe::{probe, ResolutionOutcome};
pub use resolve::{Addrs, Name, Resolve, Resolving};
pub use simulate::{
    SimulatedResolver, COMMON_HIT_RATE, COMMON_LATENCY_MS, COMMON_PREFIXES, DEFAULT_HIT_RATE,
    DEFAULT_LATENCY_MS,
};
