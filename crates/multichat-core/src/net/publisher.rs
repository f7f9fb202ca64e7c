//! Outbound send paths: server broadcasts and client replies.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};

use tokio::net::UdpSocket;

use super::sender_socket;
use crate::clock::now_wall_clock;
use crate::error::{CoreError, Result};
use crate::protocol::{client_frame, register_frame, server_frame};

/// Sends operator text to the multicast group, one datagram per message.
///
/// Stateless per send. No chunking: payloads are assumed to fit a single
/// datagram, since the receive side reads at most 1024 bytes.
pub struct BroadcastPublisher {
    socket: UdpSocket,
    group: SocketAddr,
}

impl BroadcastPublisher {
    /// Open a send socket towards `group:port`.
    pub fn open(group: Ipv4Addr, port: u16) -> Result<Self> {
        if !group.is_multicast() {
            return Err(CoreError::InvalidGroup(group));
        }

        let socket = UdpSocket::from_std(sender_socket()?)?;
        Ok(Self {
            socket,
            group: SocketAddr::from(SocketAddrV4::new(group, port)),
        })
    }

    /// Frame `text` as a server broadcast and transmit it. Returns the
    /// framed line so the caller can log what went out.
    pub async fn send(&self, text: &str) -> Result<String> {
        let framed = server_frame(&now_wall_clock(), text);
        self.socket.send_to(framed.as_bytes(), self.group).await?;
        Ok(framed)
    }
}

/// Client-side unicast sender towards the server's control port.
pub struct ReplySender {
    socket: UdpSocket,
    server: SocketAddr,
    local_ip: IpAddr,
}

impl ReplySender {
    /// Open a send socket towards the server. `local_ip` is the address
    /// this client labels its messages with.
    pub fn open(server: SocketAddr, local_ip: IpAddr) -> Result<Self> {
        let socket = UdpSocket::from_std(sender_socket()?)?;
        Ok(Self {
            socket,
            server,
            local_ip,
        })
    }

    /// Announce this client to the server.
    pub async fn register(&self) -> Result<()> {
        let framed = register_frame(self.local_ip);
        self.socket.send_to(framed.as_bytes(), self.server).await?;
        Ok(())
    }

    /// Frame `text` as a reply and transmit it. Returns the framed line.
    pub async fn send(&self, text: &str) -> Result<String> {
        let framed = client_frame(self.local_ip, &now_wall_clock(), text);
        self.socket.send_to(framed.as_bytes(), self.server).await?;
        Ok(framed)
    }
}
