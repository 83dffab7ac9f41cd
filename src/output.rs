//! Console output: found lines, verbose diagnostics, banners, summary.
//!
//! Every line goes through a fallible `writeln!`, never `println!`. A reader
//! that goes away (`subenum ... | head`) turns into a closed sink instead of
//! a panic in every worker.

use crate::base::error::ScanError;
use crate::dns::{Name, ResolutionOutcome};
use crate::scan::{ResolutionMode, ScanConfig, ScanSink, ScanSummary};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

pub const PROGRAM_NAME: &str = "subenum";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Writes results to stdout (or any writer) as workers report them.
///
/// Lines are written whole under one lock, so concurrent workers never
/// split a line. A `BrokenPipe` marks the sink closed and later lines are
/// dropped; any other write error is logged and the scan carries on.
pub struct ConsoleSink<W = io::Stdout> {
    simulated: bool,
    verbose: bool,
    out: Mutex<W>,
    closed: AtomicBool,
}

impl ConsoleSink {
    pub fn new(simulated: bool, verbose: bool) -> Self {
        Self::with_writer(simulated, verbose, io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn with_writer(simulated: bool, verbose: bool, out: W) -> Self {
        Self {
            simulated,
            verbose,
            out: Mutex::new(out),
            closed: AtomicBool::new(false),
        }
    }

    fn tag(&self) -> &'static str {
        if self.simulated {
            " (SIMULATED)"
        } else {
            ""
        }
    }

    /// "Found: www.example.com" or "Found (SIMULATED): www.example.com".
    pub fn found_line(&self, name: &Name) -> String {
        format!("Found{}: {name}", self.tag())
    }

    /// Verbose per-lookup diagnostic.
    pub fn diagnostic_line(&self, name: &Name, outcome: &ResolutionOutcome) -> String {
        match (&outcome.address, &outcome.error) {
            (Some(addr), _) => format!(
                "Resolved{}: {name} (IP: {addr}) in {:?}",
                self.tag(),
                outcome.elapsed
            ),
            (None, Some(error)) => format!(
                "Failed to resolve{}: {name} (Error: {error}) in {:?}",
                self.tag(),
                outcome.elapsed
            ),
            (None, None) => format!(
                "Failed to resolve{}: {name} in {:?}",
                self.tag(),
                outcome.elapsed
            ),
        }
    }

    fn emit(&self, line: &str) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                if !self.closed.swap(true, Ordering::AcqRel) {
                    tracing::debug!("output closed, stopping scan");
                }
            } else {
                tracing::warn!(error = %e, "failed to write result");
            }
        }
    }
}

impl<W: Write + Send> ScanSink for ConsoleSink<W> {
    fn on_found(&self, name: &Name, _outcome: &ResolutionOutcome) {
        self.emit(&self.found_line(name));
    }

    fn on_probed(&self, name: &Name, outcome: &ResolutionOutcome) {
        if self.verbose {
            self.emit(&self.diagnostic_line(name, outcome));
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<W> std::fmt::Debug for ConsoleSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("simulated", &self.simulated)
            .field("verbose", &self.verbose)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Write `text` and a newline to stdout, ignoring a closed stdout.
pub fn print_block(text: &str) {
    let mut out = io::stdout().lock();
    if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "stdout unavailable");
    }
}

pub fn simulation_banner() -> String {
    [
        "",
        "╔════════════════════════════════════════════════════════════════════╗",
        "║  SIMULATION MODE ACTIVE - NO ACTUAL DNS QUERIES WILL BE PERFORMED  ║",
        "║  Results are artificially generated for educational purposes only  ║",
        "╚════════════════════════════════════════════════════════════════════╝",
        "",
    ]
    .join("\n")
}

/// `--version` output.
pub fn version_report(simulated: bool) -> String {
    let mut report = format!("{PROGRAM_NAME} v{VERSION}");
    if simulated {
        report.push_str("\nRunning in SIMULATION mode");
    }
    report
}

/// Message for a fatal error. Bad flags also get the usage line.
pub fn error_report(error: &ScanError) -> String {
    if error.is_config_error() {
        format!("Error: {error}\nUsage: {PROGRAM_NAME} -w <wordlist_file> <domain>")
    } else {
        format!("Error: {error}")
    }
}

/// Verbose settings banner printed before the scan.
pub fn settings_banner(config: &ScanConfig, wordlist: &Path) -> String {
    let mut lines = vec![format!("Starting {PROGRAM_NAME} v{VERSION}")];
    match config.mode {
        ResolutionMode::Simulated { hit_rate, seed } => {
            lines.push("Mode: SIMULATION (no actual DNS queries)".to_string());
            lines.push(format!("Simulated hit rate: {hit_rate}%"));
            if let Some(seed) = seed {
                lines.push(format!("Simulation seed: {seed}"));
            }
        }
        ResolutionMode::Live => lines.push("Mode: LIVE DNS RESOLUTION".to_string()),
    }
    lines.push(format!("Target domain: {}", config.domain));
    lines.push(format!("Wordlist: {}", wordlist.display()));
    lines.push(format!("Concurrency: {} workers", config.concurrency));
    lines.push(format!("Timeout: {} ms", config.timeout.as_millis()));
    if !config.is_simulated() {
        lines.push(format!("DNS Server: {}", config.resolver));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

/// Verbose summary printed after the scan.
pub fn summary_report(summary: &ScanSummary, simulated: bool) -> String {
    let mut lines = vec![String::new()];
    if summary.interrupted {
        lines.push(format!("Scan interrupted for {}", summary.domain));
    } else {
        lines.push(format!("Scan completed for {}", summary.domain));
    }
    lines.push(format!("Processed {} subdomain prefixes", summary.processed));
    lines.push(format!(
        "Found {} {}subdomains",
        summary.found,
        if simulated { "simulated " } else { "" }
    ));
    lines.push(format!("Elapsed: {:.2?}", summary.elapsed));
    if simulated {
        lines.push(String::new());
        lines.push(
            "NOTE: Results were simulated and no actual DNS queries were performed.".to_string(),
        );
        lines.push("This mode is intended for educational and testing purposes only.".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(self.0.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn hit() -> ResolutionOutcome {
        ResolutionOutcome::resolved(IpAddr::V4(Ipv4Addr::LOCALHOST), Duration::from_millis(1))
    }

    #[test]
    fn test_sink_writes_whole_lines() {
        let sink = ConsoleSink::with_writer(true, true, Vec::new());
        sink.on_probed(&Name::new("www.example.com"), &hit());
        sink.on_found(&Name::new("www.example.com"), &hit());

        let written = String::from_utf8(sink.out.lock().unwrap().clone()).unwrap();
        assert_eq!(
            written,
            "Resolved (SIMULATED): www.example.com (IP: 127.0.0.1) in 1ms\n\
             Found (SIMULATED): www.example.com\n"
        );
        assert!(!sink.is_closed());
    }

    #[test]
    fn test_broken_pipe_closes_sink() {
        let sink = ConsoleSink::with_writer(false, false, FailingWriter(io::ErrorKind::BrokenPipe));
        sink.on_found(&Name::new("www.example.com"), &hit());
        assert!(sink.is_closed());
        // Later lines are dropped without touching the writer
        sink.on_found(&Name::new("api.example.com"), &hit());
        assert!(sink.is_closed());
    }

    #[test]
    fn test_other_write_errors_keep_sink_open() {
        let sink = ConsoleSink::with_writer(false, true, FailingWriter(io::ErrorKind::Other));
        sink.on_found(&Name::new("www.example.com"), &hit());
        sink.on_probed(&Name::new("www.example.com"), &hit());
        assert!(!sink.is_closed());
    }

    #[test]
    fn test_version_report() {
        assert_eq!(version_report(false), format!("subenum v{VERSION}"));
        assert_eq!(
            version_report(true),
            format!("subenum v{VERSION}\nRunning in SIMULATION mode")
        );
    }

    #[test]
    fn test_error_report_adds_usage_for_bad_flags() {
        let config = error_report(&ScanError::InvalidConcurrency);
        assert!(config.starts_with("Error: Concurrency level must be greater than 0"));
        assert!(config.ends_with("Usage: subenum -w <wordlist_file> <domain>"));

        let io = error_report(&ScanError::wordlist_open(
            "words.txt",
            io::Error::from(io::ErrorKind::NotFound),
        ));
        assert!(io.starts_with("Error: Error opening wordlist file words.txt"));
        assert!(!io.contains("Usage"));
    }

    #[test]
    fn test_simulation_banner() {
        let banner = simulation_banner();
        assert!(banner.contains("SIMULATION MODE ACTIVE"));
        assert_eq!(banner.lines().count(), 5);
    }

    #[test]
    fn test_found_line() {
        let name = Name::new("www.example.com");
        assert_eq!(ConsoleSink::new(false, false).found_line(&name), "Found: www.example.com");
        assert_eq!(
            ConsoleSink::new(true, false).found_line(&name),
            "Found (SIMULATED): www.example.com"
        );
    }

    #[test]
    fn test_diagnostic_lines() {
        let sink = ConsoleSink::new(false, true);
        let name = Name::new("api.example.com");

        let hit = ResolutionOutcome::resolved(
            IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            Duration::from_millis(12),
        );
        assert_eq!(
            sink.diagnostic_line(&name, &hit),
            "Resolved: api.example.com (IP: 93.184.216.34) in 12ms"
        );

        let miss = ResolutionOutcome::unresolved(
            ScanError::name_not_resolved("api.example.com", "no such host"),
            Duration::from_millis(3),
        );
        assert_eq!(
            sink.diagnostic_line(&name, &miss),
            "Failed to resolve: api.example.com (Error: api.example.com: no such host) in 3ms"
        );
    }

    #[test]
    fn test_settings_banner_live_shows_server() {
        let config = ScanConfig::new("example.com").concurrency(10);
        let banner = settings_banner(&config, Path::new("words.txt"));

        assert!(banner.contains("Mode: LIVE DNS RESOLUTION"));
        assert!(banner.contains("DNS Server: 8.8.8.8:53"));
        assert!(banner.contains("Concurrency: 10 workers"));
        assert!(banner.contains("Timeout: 1000 ms"));
        assert!(banner.ends_with("---"));
    }

    #[test]
    fn test_settings_banner_simulated_hides_server() {
        let config = ScanConfig::new("example.com").simulate(30).seed(4);
        let banner = settings_banner(&config, Path::new("words.txt"));

        assert!(banner.contains("Simulated hit rate: 30%"));
        assert!(banner.contains("Simulation seed: 4"));
        assert!(!banner.contains("DNS Server"));
    }

    #[test]
    fn test_summary_report() {
        let summary = ScanSummary {
            domain: "example.com".into(),
            processed: 10,
            found: 3,
            total: Some(10),
            interrupted: false,
            elapsed: Duration::from_millis(1500),
        };

        let live = summary_report(&summary, false);
        assert!(live.contains("Scan completed for example.com"));
        assert!(live.contains("Processed 10 subdomain prefixes"));
        assert!(live.contains("Found 3 subdomains"));
        assert!(!live.contains("NOTE"));

        let simulated = summary_report(&summary, true);
        assert!(simulated.contains("Found 3 simulated subdomains"));
        assert!(simulated.contains("NOTE: Results were simulated"));

        let interrupted = ScanSummary {
            interrupted: true,
            ..summary
        };
        assert!(summary_report(&interrupted, false).contains("Scan interrupted for example.com"));
    }
}
