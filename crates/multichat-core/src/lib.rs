//! Core library for multichat, a minimal multicast chat utility.
//!
//! A server broadcasts operator text to a multicast group and tracks which
//! client addresses have recently been seen on a unicast control port;
//! clients that stay silent past the expiry window are evicted. This crate
//! holds the peer registry, the liveness sweeper, the inbound listener, the
//! outbound send paths, and the wire protocol. Terminal I/O lives in the
//! CLI crate.

pub mod clock;
pub mod error;
pub mod net;
pub mod protocol;
pub mod registry;

pub use error::{CoreError, Result};
pub use net::{BroadcastPublisher, InboundEvent, InboundListener, ReplySender};
pub use registry::{LivenessSweeper, PeerEntry, PeerRegistry};
