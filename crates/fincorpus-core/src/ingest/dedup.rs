use std::collections::HashSet;

use super::normalizer::fingerprint;

/// Fingerprints seen during one run. Nothing is persisted between runs.
#[derive(Debug)]
pub struct Deduplicator {
    seen: HashSet<String>,
    prefix_chars: usize,
}

impl Deduplicator {
    #[must_use]
    pub fn new(prefix_chars: usize) -> Self {
        Self {
            seen: HashSet::new(),
            prefix_chars,
        }
    }

    pub fn fingerprint(&self, normalized: &str) -> String {
        fingerprint(normalized, self.prefix_chars)
    }

    pub fn is_duplicate(&self, fingerprint: &str) -> bool {
        self.seen.contains(fingerprint)
    }

    pub fn register(&mut self, fingerprint: String) {
        self.seen.insert(fingerprint);
    }

    /// Registers the text and reports whether it was new.
    pub fn check_and_register(&mut self, normalized: &str) -> bool {
        let fp = self.fingerprint(normalized);
        if self.is_duplicate(&fp) {
            return false;
        }
        self.register(fp);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(400)
    }
}
