//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Multichat - multicast chat server and client
#[derive(Parser, Debug)]
#[command(name = "multichat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat server: broadcast to the group, track client liveness
    Serve(ServeArgs),

    /// Run a chat client: receive broadcasts, reply to the server
    Client(ClientArgs),
}

// ==================== Serve ====================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Multicast group to broadcast to
    #[arg(long, default_value = "230.0.0.1", env = "MULTICHAT_GROUP")]
    pub group: String,

    /// Multicast port
    #[arg(long, default_value = "5000", env = "MULTICHAT_PORT")]
    pub port: u16,

    /// Unicast port for client registrations and replies
    #[arg(long, default_value = "6000", env = "MULTICHAT_CONTROL_PORT")]
    pub control_port: u16,

    /// Seconds of silence after which a client is evicted
    #[arg(long, default_value = "30")]
    pub expiry_secs: u64,

    /// Seconds between eviction passes
    #[arg(long, default_value = "10")]
    pub sweep_secs: u64,
}

// ==================== Client ====================

#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Server IP address (replies go to its control port)
    pub server: String,

    /// Multicast group to join
    #[arg(long, default_value = "230.0.0.1", env = "MULTICHAT_GROUP")]
    pub group: String,

    /// Multicast port
    #[arg(long, default_value = "5000", env = "MULTICHAT_PORT")]
    pub port: u16,

    /// Server control port
    #[arg(long, default_value = "6000", env = "MULTICHAT_CONTROL_PORT")]
    pub control_port: u16,
}
