//! Timestamped console logging, the way the server journals events.

use colored::*;

use multichat_core::clock::now_wall_clock;

/// Print a `[LOG HH:mm:ss]` line.
pub fn log(msg: &str) {
    println!("{} {}", format!("[LOG {}]", now_wall_clock()).dimmed(), msg);
}

/// Print a `[LOG HH:mm:ss]` error line to stderr.
pub fn error(msg: &str) {
    eprintln!(
        "{} {}",
        format!("[LOG {}]", now_wall_clock()).dimmed(),
        msg.red()
    );
}
