//! Wordlist generation for the `wordlist-gen` binary.
//!
//! Builds a de-duplicated list of subdomain prefixes from three sources:
//! a built-in list of common labels, terms pulled out of a domain name,
//! and `prefix-word` combinations. Insertion order is preserved.

use crate::base::context::IoResultExt;
use crate::base::error::ScanError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Prefixes seen on most public zones.
pub const COMMON_WORDLIST: &[&str] = &[
    "www", "mail", "remote", "blog", "webmail", "server", "ns1", "ns2", "smtp", "secure", "vpn",
    "m", "shop", "ftp", "mail2", "test", "portal", "admin", "host", "api", "dev", "web", "cloud",
    "email", "apps", "support", "app", "staging", "proxy", "beta", "gateway", "cdn", "auth",
    "intranet", "mobile", "sso", "help", "docs",
];

const STRIPPED_TLDS: &[&str] = &[".com", ".org", ".net", ".edu", ".gov", ".io"];

/// Split a domain into candidate terms.
///
/// `acme-corp.internal.com` gives `acme`, `corp`, `internal`. Terms of two
/// characters or fewer are dropped.
pub fn domain_terms(domain: &str) -> Vec<String> {
    let mut stem = domain.trim();
    for tld in STRIPPED_TLDS {
        stem = stem.strip_suffix(tld).unwrap_or(stem);
    }
    stem.split(['.', '-', '_'])
        .filter(|part| part.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Ordered, de-duplicated wordlist.
#[derive(Debug, Default, Clone)]
pub struct WordlistBuilder {
    words: Vec<String>,
    seen: HashSet<String>,
}

impl WordlistBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry. Returns false if it was blank or already present.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || self.seen.contains(word) {
            return false;
        }
        self.seen.insert(word.to_string());
        self.words.push(word.to_string());
        true
    }

    /// Add [`COMMON_WORDLIST`]. Returns the entries that were new.
    pub fn add_common(&mut self) -> Vec<String> {
        self.extend(COMMON_WORDLIST.iter().copied())
    }

    /// Add the [`domain_terms`] of `domain`. Returns the entries that were new.
    pub fn add_domain_terms(&mut self, domain: &str) -> Vec<String> {
        let terms = domain_terms(domain);
        self.extend(terms.iter().map(String::as_str))
    }

    /// For each prefix, add the prefix itself and `prefix-word` for every
    /// word present before this call. Returns the entries that were new.
    pub fn add_combinations<'a>(&mut self, prefixes: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let base = self.words.clone();
        let mut added = Vec::new();
        for prefix in prefixes.into_iter().map(str::trim).filter(|p| !p.is_empty()) {
            if self.add(prefix) {
                added.push(prefix.to_string());
            }
            for word in &base {
                let combination = format!("{prefix}-{word}");
                if self.add(&combination) {
                    added.push(combination);
                }
            }
        }
        added
    }

    fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        words
            .into_iter()
            .filter(|word| self.add(word))
            .map(str::to_string)
            .collect()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Write one entry per line.
    pub fn write_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for word in &self.words {
            writeln!(out, "{word}")?;
        }
        out.flush()
    }

    /// Create (or truncate) `path` and write the list to it.
    pub fn write_file(&self, path: &Path) -> Result<(), ScanError> {
        let file = File::create(path).write_context(path)?;
        self.write_to(BufWriter::new(file)).write_context(path)
    }
}
