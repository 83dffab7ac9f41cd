//! Base types and error handling.
//!
//! - [`ScanError`](error::ScanError): every failure the crate can report
//! - [`IoResultExt`](context::IoResultExt): attaches wordlist context to IO errors

pub mod context;
pub mod error;
