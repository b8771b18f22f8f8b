//! Property-based tests over the distance metric, bucket placement, and
//! neighbour selection.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use async_trait::async_trait;
use kad_routing_core::{
    Clock, Digest, Endpoint, Node, NodeId, PingSender, RoutingTable, RoutingTableConfig, SendError,
};
use proptest::prelude::*;

struct ZeroClock;
impl Clock for ZeroClock {
    fn now(&self) -> u64 {
        0
    }
}

struct NullSender;
#[async_trait]
impl PingSender for NullSender {
    async fn send_ping(&self, _destination: Endpoint) -> Result<Digest, SendError> {
        Ok([0u8; 32])
    }
}

fn arb_id_bytes() -> impl Strategy<Value = [u8; 32]> {
    proptest::array::uniform32(any::<u8>())
}

fn node_from_bytes(bytes: [u8; 32], port: u16) -> Node {
    Node::new(
        NodeId::from_bytes(bytes),
        vec![],
        Endpoint::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port, None),
    )
}

proptest! {
    /// XOR distance is symmetric: d(a, b) == d(b, a).
    #[test]
    fn distance_is_symmetric(a in arb_id_bytes(), b in arb_id_bytes()) {
        let a = NodeId::from_bytes(a);
        let b = NodeId::from_bytes(b);
        prop_assert_eq!(a.xor(&b), b.xor(&a));
    }

    /// XOR distance to self is always zero.
    #[test]
    fn distance_to_self_is_zero(a in arb_id_bytes()) {
        let a = NodeId::from_bytes(a);
        prop_assert_eq!(a.xor(&a).leading_zeros(), NodeId::BITS);
    }

    /// `common_prefix_length` is always within `0..=255`, and two ids that
    /// differ fall in the bucket whose index equals their shared prefix
    /// length, which is strictly less than the id's bit width.
    #[test]
    fn common_prefix_length_is_in_range(a in arb_id_bytes(), b in arb_id_bytes()) {
        let a = NodeId::from_bytes(a);
        let b = NodeId::from_bytes(b);
        let cpl = a.common_prefix_length(&b);
        prop_assert!(cpl < NodeId::BITS);
    }

    /// A single insert into an empty table is always reported as a member
    /// and is always returned as its own nearest neighbour.
    #[test]
    fn single_insert_is_its_own_neighbour(id in arb_id_bytes(), local_id in arb_id_bytes()) {
        prop_assume!(id != local_id);
        let local = node_from_bytes(local_id, 0);
        let config = RoutingTableConfig::default();
        let mut table = RoutingTable::new(local, Arc::new(NullSender), Arc::new(ZeroClock), config);

        let peer = node_from_bytes(id, 1);
        tokio_test_block_on(table.refresh_node(peer.clone())).unwrap();

        prop_assert!(table.member(&peer));
        let neighbours = table.neighbours(&peer.id);
        prop_assert_eq!(neighbours.len(), 1);
        prop_assert_eq!(neighbours[0].id, peer.id);
    }

    /// `neighbours` never returns more than the configured bucket capacity,
    /// regardless of how many distinct peers have been inserted.
    #[test]
    fn neighbours_never_exceeds_capacity(
        ids in proptest::collection::vec(arb_id_bytes(), 0..40),
        local_id in arb_id_bytes(),
    ) {
        let local = node_from_bytes(local_id, 0);
        let config = RoutingTableConfig { bucket_capacity: 4, ..RoutingTableConfig::default() };
        let mut table = RoutingTable::new(local, Arc::new(NullSender), Arc::new(ZeroClock), config);

        for (i, id) in ids.into_iter().enumerate() {
            if id == local_id {
                continue;
            }
            let port = u16::try_from(i % u16::MAX as usize).unwrap_or(0);
            let peer = node_from_bytes(id, port);
            let _ = tokio_test_block_on(table.refresh_node(peer));
        }

        let target = NodeId::random();
        prop_assert!(table.neighbours(&target).len() <= 4);
    }

    /// Results from `neighbours` are always sorted by ascending XOR distance
    /// to the target.
    #[test]
    fn neighbours_are_distance_sorted(
        ids in proptest::collection::vec(arb_id_bytes(), 0..20),
        local_id in arb_id_bytes(),
        target_bytes in arb_id_bytes(),
    ) {
        let local = node_from_bytes(local_id, 0);
        let config = RoutingTableConfig { bucket_capacity: 16, ..RoutingTableConfig::default() };
        let mut table = RoutingTable::new(local, Arc::new(NullSender), Arc::new(ZeroClock), config);

        for (i, id) in ids.into_iter().enumerate() {
            if id == local_id {
                continue;
            }
            let port = u16::try_from(i % u16::MAX as usize).unwrap_or(0);
            let peer = node_from_bytes(id, port);
            let _ = tokio_test_block_on(table.refresh_node(peer));
        }

        let target = NodeId::from_bytes(target_bytes);
        let found = table.neighbours(&target);
        for pair in found.windows(2) {
            prop_assert!(pair[0].id.xor(&target) <= pair[1].id.xor(&target));
        }
    }
}

/// Property tests run outside a Tokio reactor; this bridges the async API
/// into proptest's synchronous test closures without pulling a full runtime
/// dependency into the proptest cases above.
fn tokio_test_block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build current-thread runtime")
        .block_on(fut)
}
