//! Node identity and the XOR distance metric.
//!
//! `NodeId` is a 256-bit opaque identifier. The core never derives it itself
//! from network traffic — it is handed one by the caller, typically computed
//! from a peer's public key by the discovery wire layer. `from_public_key` is
//! provided as one convenient derivation (BLAKE3 with domain separation) for
//! callers that don't already have an external scheme.

use std::cmp::Ordering;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::Distance;

/// 256-bit node identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId([u8; Self::BYTES]);

impl NodeId {
    /// Number of bits in a `NodeId`.
    pub const BITS: usize = 256;
    /// Number of bytes in a `NodeId`.
    pub const BYTES: usize = Self::BITS / 8;

    /// Generate a random `NodeId`. Intended for tests and simulation.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; Self::BYTES];
        rng.fill(&mut bytes[..]);
        Self(bytes)
    }

    /// Derive a `NodeId` from a public key via BLAKE3 with domain separation.
    ///
    /// This is a convenience derivation, not a mandated one: the core treats
    /// `NodeId` as opaque and any externally-derived 32-byte id is equally
    /// valid (see [`NodeId::from_bytes`]).
    #[must_use]
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(public_key);
        hasher.update(b"kad-routing-core-node-id");
        let hash = hasher.finalize();
        Self(*hash.as_bytes())
    }

    /// Construct a `NodeId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of this id.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::BYTES] {
        &self.0
    }

    /// Bitwise XOR distance to another id.
    #[must_use]
    pub fn xor(&self, other: &NodeId) -> Distance {
        let mut out = [0u8; Self::BYTES];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i] ^ other.0[i];
        }
        Distance::from_bytes(out)
    }

    /// Number of leading bits `self` shares with `other`.
    ///
    /// Range is `0..=255`: identical ids are defined to share 255 leading
    /// bits rather than 256, matching the bucket-index range `0..N-1` (the
    /// local node's own id is never looked up this way — it is filtered out
    /// before any bucket computation happens).
    #[must_use]
    pub fn common_prefix_length(&self, other: &NodeId) -> usize {
        let leading = self.xor(other).leading_zeros();
        leading.min(Self::BITS - 1)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", hex_prefix(&self.0))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex_prefix(&self.0))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes[..8].iter().map(|b| format!("{b:02x}")).collect()
}
