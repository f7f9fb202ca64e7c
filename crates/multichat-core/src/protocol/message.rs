//! Datagram classification and message framing.
//!
//! Classification is a standalone function so it can be tested without a
//! socket. Frame builders take the clock string from the caller; timestamps
//! are cosmetic and never parsed back out of a frame.

use std::net::IpAddr;

/// Prefix token a client sends once at startup.
const REGISTER_TOKEN: &str = "REGISTER";

/// An inbound datagram on the control port, classified by prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A `REGISTER <claimed-ip>` registration. The claimed address is
    /// informational only; the socket-reported source is authoritative.
    Register { claimed: Option<IpAddr> },

    /// Anything else is a free-text reply.
    Reply { text: String },
}

/// Classify a control-port payload.
///
/// Parsing is permissive: a payload without the `REGISTER` prefix is a
/// reply, never an error.
pub fn classify(payload: &str) -> Inbound {
    match payload.strip_prefix(REGISTER_TOKEN) {
        Some(rest) => Inbound::Register {
            claimed: rest.trim().parse().ok(),
        },
        None => Inbound::Reply {
            text: payload.to_string(),
        },
    }
}

/// Frame `text` as a server broadcast: `[Servidor HH:mm:ss] <text>`.
pub fn server_frame(clock: &str, text: &str) -> String {
    format!("[Servidor {}] {}", clock, text)
}

/// Frame `text` as a client reply: `[Cliente <ip> HH:mm:ss] <text>`.
pub fn client_frame(ip: IpAddr, clock: &str, text: &str) -> String {
    format!("[Cliente {} {}] {}", ip, clock, text)
}

/// Build the `REGISTER <ip>` announcement a client sends once at startup.
pub fn register_frame(ip: IpAddr) -> String {
    format!("{} {}", REGISTER_TOKEN, ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_classify_register_with_claimed_ip() {
        let inbound = classify("REGISTER 10.0.0.9");
        assert_eq!(
            inbound,
            Inbound::Register {
                claimed: Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)))
            }
        );
    }

    #[test]
    fn test_classify_register_without_claimed_ip() {
        assert_eq!(classify("REGISTER"), Inbound::Register { claimed: None });
        assert_eq!(
            classify("REGISTER not-an-ip"),
            Inbound::Register { claimed: None }
        );
    }

    #[test]
    fn test_classify_free_text_is_reply() {
        let inbound = classify("[Cliente 10.0.0.5 12:00:00] hola");
        assert_eq!(
            inbound,
            Inbound::Reply {
                text: "[Cliente 10.0.0.5 12:00:00] hola".to_string()
            }
        );
    }

    #[test]
    fn test_classify_is_prefix_sensitive() {
        // Registration must lead the payload; anything else is a reply.
        assert!(matches!(classify(" REGISTER 1.2.3.4"), Inbound::Reply { .. }));
        assert!(matches!(classify("register 1.2.3.4"), Inbound::Reply { .. }));
    }

    #[test]
    fn test_server_frame() {
        assert_eq!(
            server_frame("14:03:22", "hello everyone"),
            "[Servidor 14:03:22] hello everyone"
        );
    }

    #[test]
    fn test_client_frame() {
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(
            client_frame(ip, "14:03:25", "hola"),
            "[Cliente 10.0.0.5 14:03:25] hola"
        );
    }

    #[test]
    fn test_register_frame_round_trips_through_classify() {
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 7));
        assert_eq!(
            classify(&register_frame(ip)),
            Inbound::Register { claimed: Some(ip) }
        );
    }
}
