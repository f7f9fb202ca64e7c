//! Client liveness registry.
//!
//! The sole shared mutable state in the system: a map from peer address to
//! the last time a datagram arrived from it. The inbound listener writes
//! through [`PeerRegistry::upsert`], the sweeper deletes through
//! [`PeerRegistry::evict_older_than`], and the operator's `list` view reads
//! through [`PeerRegistry::snapshot`].

pub mod sweeper;

pub use sweeper::LivenessSweeper;

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// A registered peer and the last time a datagram arrived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerEntry {
    pub addr: IpAddr,
    pub last_seen_ms: u64,
}

/// Thread-safe map of peer address to last-seen timestamp.
///
/// A full-map lock is enough here: load is low and every operation is a
/// cheap map access, so readers never observe a torn view and writers are
/// never blocked for long.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: Mutex<HashMap<IpAddr, u64>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<IpAddr, u64>> {
        // A poisoned lock only means a panic elsewhere; the map itself is
        // always in a consistent state between operations.
        self.peers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or refresh the entry for `addr`. Last write wins per key.
    pub fn upsert(&self, addr: IpAddr, now_ms: u64) {
        self.lock().insert(addr, now_ms);
    }

    /// Point-in-time copy of all entries, sorted by address for stable
    /// display.
    pub fn snapshot(&self) -> Vec<PeerEntry> {
        let mut entries: Vec<PeerEntry> = self
            .lock()
            .iter()
            .map(|(&addr, &last_seen_ms)| PeerEntry { addr, last_seen_ms })
            .collect();
        entries.sort_by_key(|entry| entry.addr);
        entries
    }

    /// Remove every entry with `now_ms - last_seen > threshold_ms` and
    /// return the evicted addresses for the caller to log.
    ///
    /// The comparison is strict: an entry exactly at the threshold stays.
    pub fn evict_older_than(&self, threshold_ms: u64, now_ms: u64) -> Vec<IpAddr> {
        let mut evicted = Vec::new();
        self.lock().retain(|&addr, &mut last_seen| {
            if now_ms.saturating_sub(last_seen) > threshold_ms {
                evicted.push(addr);
                false
            } else {
                true
            }
        });
        evicted.sort();
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_upsert_and_snapshot() {
        let registry = PeerRegistry::new();
        assert!(registry.is_empty());

        registry.upsert(ip(5), 0);

        assert_eq!(
            registry.snapshot(),
            vec![PeerEntry {
                addr: ip(5),
                last_seen_ms: 0
            }]
        );
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let registry = PeerRegistry::new();

        registry.upsert(ip(5), 100);
        registry.upsert(ip(5), 200);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].last_seen_ms, 200);
    }

    #[test]
    fn test_snapshot_sorted_by_address() {
        let registry = PeerRegistry::new();

        registry.upsert(ip(9), 1);
        registry.upsert(ip(1), 2);
        registry.upsert(ip(4), 3);

        let addrs: Vec<IpAddr> = registry.snapshot().into_iter().map(|e| e.addr).collect();
        assert_eq!(addrs, vec![ip(1), ip(4), ip(9)]);
    }

    #[test]
    fn test_evict_past_threshold() {
        let registry = PeerRegistry::new();
        registry.upsert(ip(5), 0);

        let evicted = registry.evict_older_than(30_000, 30_001);

        assert_eq!(evicted, vec![ip(5)]);
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_evict_retains_at_exact_threshold() {
        let registry = PeerRegistry::new();
        registry.upsert(ip(5), 0);

        // 30000 is not > 30000
        let evicted = registry.evict_older_than(30_000, 30_000);

        assert!(evicted.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_evict_is_idempotent() {
        let registry = PeerRegistry::new();
        registry.upsert(ip(5), 0);

        assert_eq!(registry.evict_older_than(30_000, 60_000), vec![ip(5)]);
        assert!(registry.evict_older_than(30_000, 60_000).is_empty());
    }

    #[test]
    fn test_evict_splits_stale_from_fresh() {
        let registry = PeerRegistry::new();
        registry.upsert(ip(1), 0);
        registry.upsert(ip(2), 50_000);

        let evicted = registry.evict_older_than(30_000, 60_000);

        assert_eq!(evicted, vec![ip(1)]);
        assert_eq!(registry.snapshot()[0].addr, ip(2));
    }

    #[test]
    fn test_refresh_outruns_eviction() {
        let registry = PeerRegistry::new();
        registry.upsert(ip(5), 0);
        registry.upsert(ip(5), 50_000);

        assert!(registry.evict_older_than(30_000, 60_000).is_empty());
    }

    #[test]
    fn test_clock_skew_counts_as_fresh() {
        let registry = PeerRegistry::new();
        // last_seen ahead of now; the subtraction must not wrap
        registry.upsert(ip(5), 100_000);

        assert!(registry.evict_older_than(30_000, 60_000).is_empty());
    }

    #[test]
    fn test_concurrent_upserts_lose_nothing() {
        let registry = Arc::new(PeerRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for round in 0..100u64 {
                        registry.upsert(ip(n), round);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 8);
        for entry in snapshot {
            // every writer's final value survives untorn
            assert_eq!(entry.last_seen_ms, 99);
        }
    }

    #[test]
    fn test_concurrent_upsert_and_evict() {
        let registry = Arc::new(PeerRegistry::new());

        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for round in 0..1_000u64 {
                    registry.upsert(ip((round % 4) as u8), round);
                }
            })
        };
        let sweeper = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    registry.evict_older_than(10, 2_000);
                }
            })
        };

        writer.join().unwrap();
        sweeper.join().unwrap();

        // Final pass with everything stale empties the map.
        registry.evict_older_than(0, 10_000);
        assert!(registry.is_empty());
    }
}
