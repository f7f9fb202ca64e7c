//! Serve command implementation.

use std::io::Write;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use multichat_core::clock::now_millis;
use multichat_core::error::CoreError;
use multichat_core::net::{BroadcastPublisher, InboundEvent, InboundListener};
use multichat_core::registry::{LivenessSweeper, PeerRegistry};

use crate::cli::ServeArgs;
use crate::console;
use crate::error::{CliError, Result};
use crate::output;

/// Run the serve command
pub async fn run_serve(args: ServeArgs, json: bool, verbose: bool) -> Result<()> {
    let group: Ipv4Addr = args.group.parse().map_err(|_| {
        CliError::InvalidArgument(format!("Invalid multicast group: {}", args.group))
    })?;

    let registry = Arc::new(PeerRegistry::new());

    // The control port is the one fixed resource; failing to bind it aborts
    // startup before any task is spawned.
    let listener = InboundListener::bind(args.control_port, registry.clone()).map_err(|e| {
        match e {
            CoreError::Io(source) => CliError::Bind {
                port: args.control_port,
                source,
            },
            other => CliError::Core(other),
        }
    })?;
    let publisher = BroadcastPublisher::open(group, args.port)?;

    println!("{}", "=== Multichat Server ===".bold());
    println!(
        "Group: {}:{} | Control port: {}",
        group, args.port, args.control_port
    );
    println!("------------------------");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listener_task = tokio::spawn(listener.run(shutdown_rx.clone(), move |event| {
        match event {
            InboundEvent::Registered { source, claimed } => {
                let mut line = format!("New client registered: {}", source.to_string().green());
                // The socket source is authoritative; surface the claimed
                // address only when it disagrees.
                if verbose {
                    if let Some(claimed) = claimed.filter(|c| *c != source) {
                        line.push_str(&format!(" (claims {})", claimed));
                    }
                }
                console::log(&line);
            }
            InboundEvent::Reply { source, text } => {
                console::log(&format!("Reply from {}: {}", source.to_string().cyan(), text));
            }
        }
    }));

    let sweeper = LivenessSweeper::with_timing(
        registry.clone(),
        Duration::from_secs(args.sweep_secs),
        Duration::from_secs(args.expiry_secs),
    );
    let sweeper_task = tokio::spawn(sweeper.run(shutdown_rx, |addr| {
        console::log(&format!("Client inactive: {}", addr.to_string().yellow()));
    }));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("message (exit/list) > ");
        std::io::stdout().flush().ok();

        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                // stdin closed
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let message = line.trim();

        if message.is_empty() {
            continue;
        }

        if message.eq_ignore_ascii_case("exit") {
            break;
        }

        if message.eq_ignore_ascii_case("list") {
            let peers = registry.snapshot();
            if json {
                println!("{}", output::format_peers_json(&peers));
            } else {
                println!("{}", output::format_peers(&peers, now_millis()));
            }
            continue;
        }

        // A failed broadcast is transient; the loop keeps serving.
        match publisher.send(message).await {
            Ok(sent) => console::log(&format!("Message sent: {}", sent)),
            Err(e) => console::error(&format!("Broadcast send error: {}", e)),
        }
    }

    // Both background tasks observe the watch channel at their blocking
    // waits, so they unblock without the sockets having to error out.
    let _ = shutdown_tx.send(true);
    let _ = listener_task.await;
    let _ = sweeper_task.await;

    Ok(())
}
