//! Kademlia routing table core for node discovery.
//!
//! This crate owns bucketed peer storage, liveness-probe eviction
//! arbitration, and closest-neighbour lookup. It deliberately knows nothing
//! about UDP sockets, wire encoding, or cryptographic signing: callers
//! implement [`PingSender`] to hand outbound `Ping`s to their own transport,
//! and feed decoded `Pong`s back in through [`RoutingTable::handle_pong`].

mod bucket;
mod config;
mod distance;
mod endpoint;
mod error;
mod node;
mod node_id;
mod pending;
mod routing_table;
mod traits;

pub use bucket::{Bucket, RefreshOutcome, DEFAULT_K};
pub use config::RoutingTableConfig;
pub use distance::Distance;
pub use endpoint::Endpoint;
pub use error::{RoutingTableError, SendError};
pub use node::Node;
pub use node_id::NodeId;
pub use pending::{Digest, ExpiredProbe};
pub use routing_table::{Pong, RoutingTable};
pub use traits::{Clock, PingSender};
