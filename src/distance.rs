//! The XOR distance metric used to order peers relative to a target.

use std::cmp::Ordering;
use std::fmt;

use crate::node_id::NodeId;

/// XOR distance between two [`NodeId`]s, ordered as a big-endian unsigned
/// integer. Used to sort neighbour-query results by closeness to a target.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Distance([u8; NodeId::BYTES]);

impl Distance {
    pub(crate) const fn from_bytes(bytes: [u8; NodeId::BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of the distance value.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; NodeId::BYTES] {
        &self.0
    }

    /// Number of leading zero bits.
    #[must_use]
    pub fn leading_zeros(&self) -> usize {
        let mut count = 0;
        for byte in &self.0 {
            if *byte == 0 {
                count += 8;
            } else {
                count += byte.leading_zeros() as usize;
                break;
            }
        }
        count
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.leading_zeros())
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
