//! Candidate feed: wordlist lines joined to the target domain.
//!
//! The feed is a shared cursor over a line source. Workers pull from it
//! directly, so a line is read only when a worker is ready for it and
//! memory stays flat no matter how long the wordlist is. The cursor sits
//! behind an async mutex, which makes "who gets the next candidate" a
//! single point of exclusion: every line is handed out exactly once.

use crate::base::context::IoResultExt;
use crate::base::error::ScanError;
use crate::dns::Name;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

type LineSource = Box<dyn AsyncBufRead + Unpin + Send>;

/// Lazy, single-pass sequence of candidate names.
pub struct CandidateFeed {
    /// `None` once the source is exhausted, failed, or the feed was closed.
    lines: Mutex<Option<Lines<LineSource>>>,
    domain: Box<str>,
    origin: Box<str>,
}

impl CandidateFeed {
    /// Feed over any buffered line source.
    pub fn new(reader: impl AsyncBufRead + Unpin + Send + 'static, domain: &str) -> Self {
        Self::with_origin(Box::new(reader), domain, "<stream>")
    }

    /// Open `path` and feed its lines.
    pub async fn open(path: impl AsRef<Path>, domain: &str) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let file = File::open(path).await.wordlist_context(path)?;
        Ok(Self::with_origin(
            Box::new(BufReader::new(file)),
            domain,
            &path.display().to_string(),
        ))
    }

    fn with_origin(reader: LineSource, domain: &str, origin: &str) -> Self {
        Self {
            lines: Mutex::new(Some(reader.lines())),
            domain: domain.into(),
            origin: origin.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Next candidate, or `None` when the feed is done.
    ///
    /// Blank lines are skipped and surrounding whitespace is trimmed. A read
    /// error ends the feed early; it is logged, not returned.
    pub async fn next(&self) -> Option<Name> {
        let mut guard = self.lines.lock().await;
        loop {
            let lines = guard.as_mut()?;
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let prefix = line.trim();
                    if prefix.is_empty() {
                        continue;
                    }
                    return Some(Name::candidate(prefix, &self.domain));
                }
                Ok(None) => {
                    tracing::debug!(origin = %self.origin, "wordlist exhausted");
                    *guard = None;
                    return None;
                }
                Err(e) => {
                    tracing::warn!(
                        origin = %self.origin,
                        error = %e,
                        "Error reading wordlist file, ending feed early"
                    );
                    *guard = None;
                    return None;
                }
            }
        }
    }

    /// Stop handing out candidates. Candidates already taken are unaffected.
    pub async fn close(&self) {
        if self.lines.lock().await.take().is_some() {
            tracing::debug!(origin = %self.origin, "feed closed before exhaustion");
        }
    }

    /// Whether the feed will hand out no more candidates.
    pub async fn is_closed(&self) -> bool {
        self.lines.lock().await.is_none()
    }
}

impl std::fmt::Debug for CandidateFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFeed")
            .field("domain", &self.domain)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Count the entries [`CandidateFeed`] would yield for `path`.
///
/// Used up front to size the progress display; uses the same blank-line
/// rule as the feed so the total matches the final processed count.
pub async fn count_entries(path: impl AsRef<Path>) -> Result<u64, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).await.wordlist_context(path)?;
    let mut lines = BufReader::new(file).lines();
    let mut total = 0u64;
    while let Some(line) = lines.next_line().await.read_context(path)? {
        if !line.trim().is_empty() {
            total += 1;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_feed_yields_in_order() {
        let feed = CandidateFeed::new(&b"www\napi\nmail\n"[..], "example.com");

        assert_eq!(feed.next().await, Some(Name::new("www.example.com")));
        assert_eq!(feed.next().await, Some(Name::new("api.example.com")));
        assert_eq!(feed.next().await, Some(Name::new("mail.example.com")));
        assert_eq!(feed.next().await, None);
        // Does not restart
        assert_eq!(feed.next().await, None);
        assert!(feed.is_closed().await);
    }

    #[tokio::test]
    async fn test_feed_skips_blank_lines_and_trims() {
        let feed = CandidateFeed::new(&b"\n  dev \r\n\n\t\nstaging"[..], "example.org");

        assert_eq!(feed.next().await, Some(Name::new("dev.example.org")));
        assert_eq!(feed.next().await, Some(Name::new("staging.example.org")));
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let feed = CandidateFeed::new(&b""[..], "example.com");
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_close_stops_feed() {
        let feed = CandidateFeed::new(&b"a\nb\nc\n"[..], "example.com");
        assert!(feed.next().await.is_some());
        feed.close().await;
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_ends_feed_early() {
        let feed = CandidateFeed::new(&b"www\n\xff\xfe\napi\n"[..], "example.com");
        assert_eq!(feed.next().await, Some(Name::new("www.example.com")));
        assert_eq!(feed.next().await, None);
        assert!(feed.is_closed().await);
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = CandidateFeed::open("/definitely/not/here.txt", "example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::WordlistOpen { .. }));
    }

    #[tokio::test]
    async fn test_count_entries_matches_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "www\n\napi\n  \nmail\n").unwrap();

        assert_eq!(count_entries(file.path()).await.unwrap(), 3);

        let feed = CandidateFeed::open(file.path(), "example.com").await.unwrap();
        let mut yielded = 0;
        while feed.next().await.is_some() {
            yielded += 1;
        }
        assert_eq!(yielded, 3);
    }
}
