//! External collaborators the core consumes but does not implement: the
//! outbound send capability and the clock.

use async_trait::async_trait;

use crate::endpoint::Endpoint;
use crate::error::SendError;
use crate::pending::Digest;

/// Capability to emit a liveness `Ping` to an endpoint and learn the
/// wire-level digest used to correlate the matching `Pong`.
///
/// UDP I/O, wire encoding, and cryptographic signing all live on the other
/// side of this trait — the core never touches them.
#[async_trait]
pub trait PingSender: Send + Sync {
    /// Emit a `Ping` to `destination` and return its digest (MDC).
    async fn send_ping(&self, destination: Endpoint) -> Result<Digest, SendError>;
}

/// Monotonic-enough wall clock, used to compare against `Pong.expiration`
/// and to timestamp pending probes.
pub trait Clock: Send + Sync {
    /// Current time, in Unix seconds.
    fn now(&self) -> u64;
}
