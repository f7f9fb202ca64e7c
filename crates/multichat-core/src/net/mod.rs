//! UDP socket construction for the chat endpoints.
//!
//! Uses SO_REUSEADDR (and SO_REUSEPORT on unix) so several chat processes
//! can share a machine during labs and tests.

pub mod listener;
pub mod publisher;

pub use listener::{InboundEvent, InboundListener};
pub use publisher::{BroadcastPublisher, ReplySender};

use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{CoreError, Result};

/// Create a UDP socket with address reuse, bound to `0.0.0.0:<port>`.
pub fn create_reusable_socket(port: u16) -> std::io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    let addr = SocketAddr::from(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
    socket.bind(&addr.into())?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// Create a receive socket joined to the multicast group on `port`.
pub fn join_multicast_group(group: Ipv4Addr, port: u16) -> Result<UdpSocket> {
    if !group.is_multicast() {
        return Err(CoreError::InvalidGroup(group));
    }

    let socket = create_reusable_socket(port)?;
    socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;

    Ok(socket)
}

/// Ephemeral send socket on any local port.
pub fn sender_socket() -> std::io::Result<UdpSocket> {
    create_reusable_socket(0)
}

/// Local IP address as seen on the route towards `peer`.
///
/// A UDP connect performs no handshake; it only fixes the local endpoint,
/// which is enough to learn the outbound interface address.
pub fn local_ip_towards(peer: SocketAddr) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(peer)?;
    Ok(socket.local_addr()?.ip())
}
