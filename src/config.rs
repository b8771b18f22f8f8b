//! Construction-time configuration for a [`crate::RoutingTable`].

use std::time::Duration;

use crate::bucket::DEFAULT_K;
use crate::node_id::NodeId;

/// Configuration supplied when constructing a [`crate::RoutingTable`].
#[derive(Debug, Clone)]
pub struct RoutingTableConfig {
    /// Number of buckets, i.e. the id bit-width. Defaults to 256.
    pub id_bits: usize,
    /// Capacity of each bucket (`K`). Defaults to 16.
    pub bucket_capacity: usize,
    /// How long an eviction-contest probe may go unanswered before the
    /// incumbent is considered dead and the challenger takes its place.
    /// Without this, a contest whose incumbent never responds would stay
    /// open forever; the default matches the low-seconds round-trip
    /// budget used elsewhere for UDP discovery traffic.
    pub probe_timeout: Duration,
}

impl Default for RoutingTableConfig {
    fn default() -> Self {
        Self {
            id_bits: NodeId::BITS,
            bucket_capacity: DEFAULT_K,
            probe_timeout: Duration::from_secs(2),
        }
    }
}
