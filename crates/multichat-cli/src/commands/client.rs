//! Client command implementation.

use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use tokio::sync::watch;

use multichat_core::net::{self, ReplySender};
use multichat_core::protocol::MAX_DATAGRAM;

use crate::cli::ClientArgs;
use crate::console;
use crate::error::{CliError, Result};

/// Run the client command
pub async fn run_client(args: ClientArgs, json: bool) -> Result<()> {
    let server_ip: IpAddr = args.server.parse().map_err(|_| {
        CliError::InvalidArgument(format!("Invalid server address: {}", args.server))
    })?;
    let group: Ipv4Addr = args.group.parse().map_err(|_| {
        CliError::InvalidArgument(format!("Invalid multicast group: {}", args.group))
    })?;

    let server = SocketAddr::new(server_ip, args.control_port);

    let group_socket = UdpSocket::from_std(net::join_multicast_group(group, args.port)?)?;
    let local_ip = net::local_ip_towards(server)?;
    let sender = ReplySender::open(server, local_ip)?;

    println!("{}", "=== Multichat Client ===".bold());
    println!(
        "Local IP: {} | Group: {}:{} | Server: {}",
        local_ip, group, args.port, server
    );

    if let Err(e) = sender.register().await {
        console::error(&format!("Registration send error: {}", e));
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let receiver_task = tokio::spawn(receive_broadcasts(group_socket, group, shutdown_rx, json));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("reply (exit) > ");
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

        let reply = line.trim();

        if reply.is_empty() {
            continue;
        }

        if reply.eq_ignore_ascii_case("exit") {
            break;
        }

        // A failed reply is transient; the loop keeps going.
        if let Err(e) = sender.send(reply).await {
            console::error(&format!("Reply send error: {}", e));
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = receiver_task.await;

    Ok(())
}

/// Print broadcasts from the group until shutdown, then leave the group.
async fn receive_broadcasts(
    socket: UdpSocket,
    group: Ipv4Addr,
    mut shutdown: watch::Receiver<bool>,
    json: bool,
) {
    let mut buf = vec![0u8; MAX_DATAGRAM];

    loop {
        tokio::select! {
            recv = socket.recv_from(&mut buf) => match recv {
                Ok((len, _)) => {
                    let message = String::from_utf8_lossy(&buf[..len]).to_string();
                    if json {
                        println!("{}", serde_json::json!({ "broadcast": message }));
                    } else {
                        println!("\n{} {}", "<<".bold(), message.cyan());
                        print!("reply (exit) > ");
                        std::io::stdout().flush().ok();
                    }
                }
                Err(e) => {
                    eprintln!("UDP receive error: {}", e);
                }
            },
            _ = shutdown.changed() => break,
        }
    }

    socket.leave_multicast_v4(group, Ipv4Addr::UNSPECIFIED).ok();
}
