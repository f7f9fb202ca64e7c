//! Output formatting for the `list` view.

use comfy_table::{Cell, ContentArrangement, Table};

use multichat_core::clock::wall_clock;
use multichat_core::registry::PeerEntry;

/// Render the active-client table.
pub fn format_peers(peers: &[PeerEntry], now_ms: u64) -> String {
    if peers.is_empty() {
        return "No active clients.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["IP", "Last seen", "Age"]);

    for peer in peers {
        let age_secs = now_ms.saturating_sub(peer.last_seen_ms) / 1000;
        table.add_row(vec![
            Cell::new(peer.addr.to_string()),
            Cell::new(wall_clock(peer.last_seen_ms)),
            Cell::new(format!("{}s", age_secs)),
        ]);
    }

    format!("{}\n\n{} active client(s)", table, peers.len())
}

/// JSON snapshot of the active clients.
pub fn format_peers_json(peers: &[PeerEntry]) -> String {
    let output = serde_json::json!({
        "clients": peers,
        "count": peers.len()
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
