//! Network endpoint — opaque to the core beyond being handed to the send
//! capability.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// A peer's network address: an IP, a UDP port, and an optional TCP port.
///
/// The core never inspects these fields beyond passing the endpoint to
/// [`crate::PingSender::send_ping`]; IPv6-specific handling and NAT
/// traversal are the caller's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// The peer's IP address.
    pub ip: IpAddr,
    /// UDP port used for discovery traffic.
    pub udp_port: u16,
    /// TCP port used for the higher-level session protocol, if known.
    pub tcp_port: Option<u16>,
}

impl Endpoint {
    /// Construct a new endpoint.
    #[must_use]
    pub const fn new(ip: IpAddr, udp_port: u16, tcp_port: Option<u16>) -> Self {
        Self {
            ip,
            udp_port,
            tcp_port,
        }
    }
}
