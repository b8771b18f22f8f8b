//! Peer records held in the routing table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::node_id::NodeId;

/// A known peer: its identity, its public key, and its network endpoint.
///
/// Two `Node` values represent "the same peer" iff their `id` fields are
/// equal — `public_key` and `endpoint` may differ across sightings (e.g. the
/// peer moved address), and the table adopts the newer record on refresh.
#[derive(Clone, Serialize, Deserialize)]
pub struct Node {
    /// The peer's node identifier.
    pub id: NodeId,
    /// The peer's public key, opaque to this crate.
    pub public_key: Vec<u8>,
    /// The peer's last-known network endpoint.
    pub endpoint: Endpoint,
}

impl Node {
    /// Construct a new `Node`.
    #[must_use]
    pub const fn new(id: NodeId, public_key: Vec<u8>, endpoint: Endpoint) -> Self {
        Self {
            id,
            public_key,
            endpoint,
        }
    }

    /// Whether `self` and `other` refer to the same peer (same id, possibly
    /// stale endpoint/key).
    #[must_use]
    pub fn is_same_peer(&self, other: &Node) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
