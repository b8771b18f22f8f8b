//! Error types. Every fallible path in this crate surfaces a typed result;
//! the rest of the API is infallible by design.

use thiserror::Error;

use crate::endpoint::Endpoint;

/// Opaque error from the caller-supplied send capability.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SendError(#[from] Box<dyn std::error::Error + Send + Sync>);

impl SendError {
    /// Wrap an arbitrary transport error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }
}

/// Errors a [`crate::RoutingTable`] can surface to its caller.
#[derive(Debug, Error)]
pub enum RoutingTableError {
    /// The send capability rejected the outbound `Ping` emitted while
    /// starting an eviction contest. The table and pending-probes entry are
    /// left unchanged.
    #[error("failed to send liveness ping to {endpoint:?}: {source}")]
    SendFailure {
        /// The endpoint the ping was addressed to.
        endpoint: Endpoint,
        /// The underlying transport error.
        #[source]
        source: SendError,
    },
}
