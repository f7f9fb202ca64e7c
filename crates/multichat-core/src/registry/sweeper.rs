//! Periodic eviction of silent peers.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use super::PeerRegistry;
use crate::clock::now_millis;

/// Default cadence between eviction passes.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Default silence window after which a peer is considered inactive.
pub const EXPIRY_WINDOW: Duration = Duration::from_secs(30);

/// Periodic task that evicts peers silent for longer than the expiry
/// window.
///
/// Owns the deletion decision exclusively; no other path removes registry
/// entries. Eviction is eventually consistent: an expired peer survives
/// until the next pass.
pub struct LivenessSweeper {
    registry: Arc<PeerRegistry>,
    interval: Duration,
    expiry: Duration,
}

impl LivenessSweeper {
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self::with_timing(registry, SWEEP_INTERVAL, EXPIRY_WINDOW)
    }

    pub fn with_timing(registry: Arc<PeerRegistry>, interval: Duration, expiry: Duration) -> Self {
        Self {
            registry,
            interval,
            expiry,
        }
    }

    /// One eviction pass. Reports each evicted address to `on_evict`.
    pub fn sweep<F>(&self, on_evict: &mut F)
    where
        F: FnMut(IpAddr),
    {
        let threshold_ms = self.expiry.as_millis() as u64;
        for addr in self.registry.evict_older_than(threshold_ms, now_millis()) {
            on_evict(addr);
        }
    }

    /// Run eviction passes on a fixed cadence until the shutdown signal
    /// fires.
    ///
    /// Cancellation during the tick wait is the normal exit path, not an
    /// error.
    pub async fn run<F>(self, mut shutdown: watch::Receiver<bool>, mut on_evict: F)
    where
        F: FnMut(IpAddr),
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.sweep(&mut on_evict),
                _ = shutdown.changed() => break,
            }
        }
    }
}
