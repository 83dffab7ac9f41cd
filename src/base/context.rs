//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into context-rich `ScanError` variants.

use crate::base::error::ScanError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add wordlist-open context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use subenum::base::context::IoResultExt;
    ///
    /// let file = File::open(path).await.wordlist_context(path)?;
    /// // Error: "Error opening wordlist file words.txt: No such file or directory"
    /// ```
    fn wordlist_context(self, path: &Path) -> Result<T, ScanError>;

    /// Add wordlist-read context to an IO error.
    fn read_context(self, path: &Path) -> Result<T, ScanError>;

    /// Add wordlist-write context to an IO error.
    fn write_context(self, path: &Path) -> Result<T, ScanError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn wordlist_context(self, path: &Path) -> Result<T, ScanError> {
        self.map_err(|e| ScanError::wordlist_open(path.display().to_string(), e))
    }

    fn read_context(self, path: &Path) -> Result<T, ScanError> {
        self.map_err(|e| ScanError::wordlist_read(path.display().to_string(), e))
    }

    fn write_context(self, path: &Path) -> Result<T, ScanError> {
        self.map_err(|e| ScanError::wordlist_write(path.display().to_string(), e))
    }
}
