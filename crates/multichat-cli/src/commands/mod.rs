//! Command implementations.

pub mod client;
pub mod serve;

pub use client::run_client;
pub use serve::run_serve;
