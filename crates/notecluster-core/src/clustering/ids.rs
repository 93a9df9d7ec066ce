//! Cluster ID generation
//!
//! Format: `cl-<hash>` with adaptive length, e.g. `cl-3e7a5b09`. The hash
//! input is the cluster label plus a per-run counter, so IDs are
//! reproducible for identical runs and never repeat within one.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// Issues unique cluster IDs for one pipeline run
#[derive(Debug, Default)]
pub struct ClusterIdGenerator {
    counter: u64,
    issued: HashSet<String>,
}

impl ClusterIdGenerator {
    /// The cluster ID prefix
    pub const PREFIX: &'static str = "cl-";

    /// Minimum hash length (8 hex chars)
    pub const MIN_HASH_LEN: usize = 8;

    /// Maximum hash length (64 hex chars for SHA256)
    pub const MAX_HASH_LEN: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an ID not yet issued by this generator.
    ///
    /// Uses the shortest hash prefix that doesn't collide with earlier IDs.
    pub fn next_id(&mut self, label: &str) -> String {
        loop {
            self.counter += 1;
            let mut hasher = Sha256::new();
            hasher.update(format!("{}:{}", label, self.counter).as_bytes());
            let full_hex = hex::encode(hasher.finalize());

            for len in Self::MIN_HASH_LEN..=Self::MAX_HASH_LEN {
                let candidate = format!("{}{}", Self::PREFIX, &full_hex[..len]);
                if self.issued.insert(candidate.clone()) {
                    return candidate;
                }
            }
        }
    }

    /// Number of IDs issued so far
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}
