//! Inbound control-port listener.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::watch;

use super::create_reusable_socket;
use crate::clock::now_millis;
use crate::error::Result;
use crate::protocol::{self, Inbound, MAX_DATAGRAM};
use crate::registry::PeerRegistry;

/// A classified datagram received on the control port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A client announced itself. `claimed` is whatever address the payload
    /// carried; `source` is the socket-reported origin and is the one the
    /// registry trusts.
    Registered {
        source: IpAddr,
        claimed: Option<IpAddr>,
    },

    /// Free-text reply from a client.
    Reply { source: IpAddr, text: String },
}

/// Receives registrations and replies on the fixed control port and keeps
/// the registry fresh.
pub struct InboundListener {
    socket: UdpSocket,
    registry: Arc<PeerRegistry>,
}

impl InboundListener {
    /// Bind the control port. A bind failure here is fatal to startup and
    /// propagates to the caller; everything after this point is contained
    /// in the receive loop.
    pub fn bind(port: u16, registry: Arc<PeerRegistry>) -> Result<Self> {
        let socket = UdpSocket::from_std(create_reusable_socket(port)?)?;
        Ok(Self { socket, registry })
    }

    /// Address the listener actually bound (port 0 resolves here).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive datagrams until the shutdown signal fires.
    ///
    /// Every datagram refreshes the registry entry for its source address,
    /// registration or not. Receive errors are logged and the loop keeps
    /// going.
    pub async fn run<F>(self, mut shutdown: watch::Receiver<bool>, mut on_event: F)
    where
        F: FnMut(InboundEvent),
    {
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            tokio::select! {
                recv = self.socket.recv_from(&mut buf) => match recv {
                    Ok((len, addr)) => {
                        let source = addr.ip();
                        self.registry.upsert(source, now_millis());

                        let payload = String::from_utf8_lossy(&buf[..len]);
                        on_event(match protocol::classify(&payload) {
                            Inbound::Register { claimed } => {
                                InboundEvent::Registered { source, claimed }
                            }
                            Inbound::Reply { text } => InboundEvent::Reply { source, text },
                        });
                    }
                    Err(e) => {
                        eprintln!("UDP receive error: {}", e);
                    }
                },
                _ = shutdown.changed() => break,
            }
        }
    }
}
