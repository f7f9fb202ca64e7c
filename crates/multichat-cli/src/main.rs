//! Multichat CLI - multicast chat server and client.
//!
//! The server broadcasts operator messages to a multicast group and tracks
//! which clients are still alive; clients join the group to receive
//! broadcasts and reply over the server's control port.

mod cli;
mod commands;
mod console;
mod error;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, cli.json, cli.verbose).await,
        Commands::Client(args) => commands::run_client(args, cli.json).await,
    }
}
