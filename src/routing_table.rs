//! The routing table: owns the local identity, the bucket array, the
//! pending-probes table, and the send capability.

use std::sync::Arc;

use crate::bucket::{Bucket, RefreshOutcome};
use crate::config::RoutingTableConfig;
use crate::error::RoutingTableError;
use crate::node::Node;
use crate::node_id::NodeId;
use crate::pending::{Digest, PendingProbes};
use crate::traits::{Clock, PingSender};

/// A `Pong` response fed back into [`RoutingTable::handle_pong`] once the
/// wire layer has decoded it. `handler_params` is populated when the pong is
/// unsolicited — i.e. a first-contact pong describing a new peer.
#[derive(Debug, Clone)]
pub struct Pong {
    /// Digest correlating this pong with an outstanding probe, if any.
    pub digest: Digest,
    /// Unix-seconds expiration carried by the pong message.
    pub expiration: u64,
}

/// The Kademlia routing table.
pub struct RoutingTable {
    local: Node,
    buckets: Vec<Bucket>,
    pending: PendingProbes,
    config: RoutingTableConfig,
    sender: Arc<dyn PingSender>,
    clock: Arc<dyn Clock>,
}

impl RoutingTable {
    /// Allocate a new routing table for `local`, with `id_bits` empty
    /// buckets of capacity `bucket_capacity`.
    #[must_use]
    pub fn new(
        local: Node,
        sender: Arc<dyn PingSender>,
        clock: Arc<dyn Clock>,
        config: RoutingTableConfig,
    ) -> Self {
        let buckets = (0..config.id_bits)
            .map(|_| Bucket::new(config.bucket_capacity))
            .collect();
        Self {
            local,
            buckets,
            pending: PendingProbes::new(),
            config,
            sender,
            clock,
        }
    }

    /// The local node's identity.
    #[must_use]
    pub const fn local(&self) -> &Node {
        &self.local
    }

    /// Bucket index a node with id `id` belongs in, relative to the local
    /// node. Always `0..config.id_bits`.
    #[must_use]
    pub fn bucket_index(&self, id: &NodeId) -> usize {
        self.local.id.common_prefix_length(id)
    }

    /// Read-only view of bucket `i`'s nodes.
    #[must_use]
    pub fn nodes_at(&self, i: usize) -> Vec<Node> {
        self.buckets[i].nodes().cloned().collect()
    }

    /// Read-only snapshot of all buckets.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of outstanding eviction-contest probes.
    #[must_use]
    pub fn pending_probe_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `node` (matched by id) is present in any bucket.
    #[must_use]
    pub fn member(&self, node: &Node) -> bool {
        if node.id == self.local.id {
            return false;
        }
        self.buckets[self.bucket_index(&node.id)].member(&node.id)
    }

    /// Insert or promote `node`. A no-op if `node.id` is the local id.
    ///
    /// If the target bucket is full, this starts an eviction contest: a
    /// `Ping` is sent to the incumbent and a pending-probes entry is
    /// recorded. The bucket itself is left unmodified until the contest
    /// resolves via [`RoutingTable::handle_pong`] or
    /// [`RoutingTable::sweep_expired_probes`].
    pub async fn refresh_node(&mut self, node: Node) -> Result<(), RoutingTableError> {
        if node.id == self.local.id {
            return Ok(());
        }

        let i = self.bucket_index(&node.id);
        let challenger = node.clone();
        let outcome = self.buckets[i].refresh_node(node);

        let incumbent = match outcome {
            RefreshOutcome::Reordered(node) => {
                tracing::debug!(bucket = i, node_id = %node.id, "refreshed existing node");
                return Ok(());
            }
            RefreshOutcome::Inserted(node) => {
                tracing::debug!(bucket = i, node_id = %node.id, "inserted new node");
                return Ok(());
            }
            RefreshOutcome::Full(incumbent) => incumbent,
        };

        tracing::info!(
            bucket = i,
            incumbent = %incumbent.id,
            challenger = %challenger.id,
            "bucket full, starting eviction contest"
        );

        let digest = self
            .sender
            .send_ping(incumbent.endpoint)
            .await
            .map_err(|source| RoutingTableError::SendFailure {
                endpoint: incumbent.endpoint,
                source,
            })?;

        let now = self.clock.now();
        self.pending.insert(digest, incumbent, challenger, now);
        Ok(())
    }

    /// Remove `node` from its bucket, if present. Does not touch the
    /// pending-probes table; an orphaned entry resolves harmlessly the next
    /// time a matching `Pong` arrives (see `handle_pong`).
    pub fn remove_node(&mut self, node: &Node) -> bool {
        let i = self.bucket_index(&node.id);
        self.buckets[i].remove_node(&node.id)
    }

    /// Up to `K` known peers closest to `target`, sorted by XOR distance.
    #[must_use]
    pub fn neighbours(&self, target: &NodeId) -> Vec<Node> {
        let k = self.config.bucket_capacity;
        let n = self.buckets.len();
        let i = self.local.id.common_prefix_length(target);

        let mut acc: Vec<Node> = self.buckets[i].nodes().cloned().collect();

        let mut step = 1usize;
        loop {
            let lo = i.checked_sub(step);
            let hi = if i + step < n { Some(i + step) } else { None };

            if lo.is_none() && hi.is_none() {
                break;
            }
            if let Some(lo) = lo {
                acc.extend(self.buckets[lo].nodes().cloned());
            }
            if let Some(hi) = hi {
                acc.extend(self.buckets[hi].nodes().cloned());
            }
            if acc.len() > k {
                break;
            }
            step += 1;
        }

        acc.sort_by_key(|node| node.id.xor(target));
        acc.truncate(k);
        acc
    }

    /// Apply a decoded `Pong`, optionally accompanied by the sender's
    /// endpoint/key when the pong is unsolicited.
    pub async fn handle_pong(
        &mut self,
        pong: Pong,
        handler_params: Option<Node>,
    ) -> Result<(), RoutingTableError> {
        let maybe_pair = self.pending.pop(&pong.digest);
        let fresh = pong.expiration > self.clock.now();

        if let Some((incumbent, _challenger)) = maybe_pair {
            if fresh {
                tracing::debug!(incumbent = %incumbent.id, "incumbent answered in time, wins contest");
                return self.refresh_node(incumbent).await;
            }
            tracing::debug!(incumbent = %incumbent.id, "matched pong arrived stale, dropping");
            return Ok(());
        }

        if let Some(node) = handler_params {
            if fresh {
                tracing::debug!(node_id = %node.id, "unsolicited fresh pong, inserting node");
                return self.refresh_node(node).await;
            }
        }

        tracing::debug!(digest = ?pong.digest, "pong dropped: unmatched or stale");
        Ok(())
    }

    /// Resolve eviction contests whose probe has gone unanswered for longer
    /// than `config.probe_timeout`: the incumbent is removed and the
    /// challenger takes its place.
    pub async fn sweep_expired_probes(&mut self) -> Result<(), RoutingTableError> {
        let now = self.clock.now();
        let timeout_secs = self.config.probe_timeout.as_secs();
        let expired = self.pending.sweep_expired(now, timeout_secs);

        for entry in expired {
            tracing::info!(
                incumbent = %entry.incumbent.id,
                challenger = %entry.challenger.id,
                "probe expired, challenger replaces incumbent"
            );
            self.remove_node(&entry.incumbent);
            self.refresh_node(entry.challenger).await?;
        }
        Ok(())
    }
}
