// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Per-IP budget for requests that fail authorization or ring verification.
//!
//! Only failures spend tokens; a client that keeps sending valid requests
//! is never limited here. Once an IP's bucket is empty its requests are
//! refused before any signature work is done.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{SystemTime, UNIX_EPOCH};

const IDLE_EVICT_MS: u128 = 10 * 60 * 1000;

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_ms: u128,
    cap: f64,
    refill_per_ms: f64,
}

impl TokenBucket {
    fn new(per_min: u64, now_ms: u128) -> Self {
        let cap = per_min.max(1) as f64;
        Self {
            tokens: cap,
            last_ms: now_ms,
            cap,
            refill_per_ms: cap / 60_000.0,
        }
    }

    fn refill(&mut self, now_ms: u128) {
        let dt = now_ms.saturating_sub(self.last_ms) as f64;
        if dt > 0.0 {
            self.tokens = (self.tokens + dt * self.refill_per_ms).min(self.cap);
            self.last_ms = now_ms;
        }
    }
}

struct Entry {
    bucket: TokenBucket,
    last_seen_ms: u128,
}

pub struct FailureThrottle {
    per_min: u64,
    max_entries: usize,
    entries: HashMap<IpAddr, Entry>,
}

impl FailureThrottle {
    pub fn new(per_min: u64, max_entries: usize) -> Self {
        Self {
            per_min,
            max_entries,
            entries: HashMap::new(),
        }
    }

    fn cleanup(&mut self, now_ms: u128) {
        if self.entries.len() <= self.max_entries {
            return;
        }
        let cutoff = now_ms.saturating_sub(IDLE_EVICT_MS);
        self.entries.retain(|_, e| e.last_seen_ms >= cutoff);
        if self.entries.len() > self.max_entries * 2 {
            self.entries.clear();
        }
    }

    /// True when `ip` has no failures left to spend.
    pub fn is_throttled(&mut self, ip: IpAddr, now_ms: u128) -> bool {
        match self.entries.get_mut(&ip) {
            Some(e) => {
                e.bucket.refill(now_ms);
                e.last_seen_ms = now_ms;
                e.bucket.tokens < 1.0
            }
            None => false,
        }
    }

    pub fn record_failure(&mut self, ip: IpAddr, now_ms: u128) {
        self.cleanup(now_ms);
        let per_min = self.per_min;
        let e = self.entries.entry(ip).or_insert_with(|| Entry {
            bucket: TokenBucket::new(per_min, now_ms),
            last_seen_ms: now_ms,
        });
        e.bucket.refill(now_ms);
        e.last_seen_ms = now_ms;
        e.bucket.tokens = (e.bucket.tokens - 1.0).max(0.0);
    }
}

pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn budget_then_refill() {
        let mut t = FailureThrottle::new(6, 100);
        for _ in 0..6 {
            assert!(!t.is_throttled(A, 0));
            t.record_failure(A, 0);
        }
        assert!(t.is_throttled(A, 0));
        assert!(!t.is_throttled(B, 0));
        // a token comes back every ten seconds
        assert!(!t.is_throttled(A, 10_500));
        t.record_failure(A, 10_500);
        assert!(t.is_throttled(A, 10_500));
    }

    #[test]
    fn unknown_ip_never_throttled() {
        let mut t = FailureThrottle::new(1, 100);
        assert!(!t.is_throttled(A, 0));
        assert!(!t.is_throttled(A, 1));
    }

    #[test]
    fn idle_entries_evicted_when_full() {
        let mut t = FailureThrottle::new(1, 1);
        t.record_failure(A, 0);
        t.record_failure(B, 0);
        assert!(t.is_throttled(A, 0));
        // both idle past the window; the next insert sweeps them
        t.record_failure(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3)), IDLE_EVICT_MS + 1);
        assert!(!t.is_throttled(A, IDLE_EVICT_MS + 1));
    }
}
