//! Wire protocol for the multicast chat.
//!
//! Plain UTF-8 text datagrams, no binary framing. Clients announce
//! themselves with `REGISTER <claimed-ip>` and reply with
//! `[Cliente <ip> HH:mm:ss] <text>`; the server broadcasts
//! `[Servidor HH:mm:ss] <text>` to the group.

pub mod message;

pub use message::{classify, client_frame, register_frame, server_frame, Inbound};

use std::net::Ipv4Addr;

/// Multicast group the server broadcasts to.
pub const GROUP_ADDRESS: Ipv4Addr = Ipv4Addr::new(230, 0, 0, 1);

/// Port the multicast group listens on.
pub const MULTICAST_PORT: u16 = 5000;

/// Unicast port the server receives registrations and replies on.
pub const CONTROL_PORT: u16 = 6000;

/// Receive buffer size. Larger datagrams truncate; senders are expected to
/// keep payloads under this cap.
pub const MAX_DATAGRAM: usize = 1024;
