//! Error types for multichat core.

use thiserror::Error;

/// Core error type for chat operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a multicast address: {0}")]
    InvalidGroup(std::net::Ipv4Addr),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
