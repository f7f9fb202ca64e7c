//! Error types for the multichat CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific
//! variants.

use multichat_core::error::CoreError;
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to bind control port {port}: {source}")]
    Bind {
        port: u16,
        source: std::io::Error,
    },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(CoreError::InvalidGroup(_)) => exit_codes::INVALID_ARGS,
            CliError::Core(CoreError::Io(_)) => exit_codes::NETWORK_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::Bind { .. } => exit_codes::NETWORK_ERROR,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_failure_maps_to_network_exit_code() {
        let err = CliError::Bind {
            port: 6000,
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(err.exit_code(), exit_codes::NETWORK_ERROR);
        assert!(format!("{}", err).contains("6000"));
    }

    #[test]
    fn test_invalid_group_maps_to_invalid_args() {
        let err = CliError::Core(CoreError::InvalidGroup(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_invalid_argument_maps_to_invalid_args() {
        let err = CliError::InvalidArgument("bad server address".to_string());
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }
}
