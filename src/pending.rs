//! The pending-probes table: outstanding liveness checks keyed by the
//! digest of the `Ping` that triggered them.

use std::collections::HashMap;

use crate::node::Node;

/// Wire-level digest (MDC) of an emitted `Ping`, opaque to this crate beyond
/// serving as a correlation key.
pub type Digest = [u8; 32];

struct ProbeEntry {
    incumbent: Node,
    challenger: Node,
    inserted_at: u64,
}

/// An expired probe entry surfaced by [`PendingProbes::sweep_expired`].
pub struct ExpiredProbe {
    /// The digest the expired entry was keyed by.
    pub digest: Digest,
    /// The incumbent that failed to respond in time.
    pub incumbent: Node,
    /// The challenger that should take its place.
    pub challenger: Node,
}

/// `digest -> (incumbent, challenger)` map of outstanding eviction contests.
#[derive(Default)]
pub struct PendingProbes {
    entries: HashMap<Digest, ProbeEntry>,
}

impl PendingProbes {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record a new outstanding probe.
    pub fn insert(&mut self, digest: Digest, incumbent: Node, challenger: Node, now: u64) {
        self.entries.insert(
            digest,
            ProbeEntry {
                incumbent,
                challenger,
                inserted_at: now,
            },
        );
    }

    /// Atomically remove and return the entry keyed by `digest`, if any.
    pub fn pop(&mut self, digest: &Digest) -> Option<(Node, Node)> {
        self.entries
            .remove(digest)
            .map(|entry| (entry.incumbent, entry.challenger))
    }

    /// Number of outstanding probes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no probes are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry inserted more than `timeout_secs` ago
    /// relative to `now`.
    pub fn sweep_expired(&mut self, now: u64, timeout_secs: u64) -> Vec<ExpiredProbe> {
        let expired_digests: Vec<Digest> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.saturating_sub(entry.inserted_at) >= timeout_secs)
            .map(|(digest, _)| *digest)
            .collect();

        expired_digests
            .into_iter()
            .filter_map(|digest| {
                self.entries.remove(&digest).map(|entry| ExpiredProbe {
                    digest,
                    incumbent: entry.incumbent,
                    challenger: entry.challenger,
                })
            })
            .collect()
    }
}
