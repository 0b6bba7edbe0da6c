//! Simple profiling guards gated by an environment variable
//!
//! This module provides lightweight profiling without changing function signatures.
//! Enable with environment variable: PATHFINDER_PROFILE=1

use parking_lot::{const_mutex, Mutex};
use std::collections::BTreeMap;
use std::time::Instant;

/// Accumulated timing for one category
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    pub total_ns: u64,
    pub calls: usize,
}

impl CategoryStats {
    pub fn average_us(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_ns as f64 / self.calls as f64 / 1000.0
        }
    }
}

// Global aggregator, keyed by category name
static STATS: Mutex<BTreeMap<&'static str, CategoryStats>> = const_mutex(BTreeMap::new());

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("PATHFINDER_PROFILE").is_ok()
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        record(self.category, self.start.elapsed().as_nanos() as u64);
    }
}

/// Adds one timed call to `category`
pub fn record(category: &'static str, elapsed_ns: u64) {
    let mut stats = STATS.lock();
    let entry = stats.entry(category).or_default();
    entry.total_ns += elapsed_ns;
    entry.calls += 1;
}

/// Copy of the current totals
pub fn snapshot() -> BTreeMap<&'static str, CategoryStats> {
    STATS.lock().clone()
}

/// Prints the totals to stderr
pub fn print_report() {
    let stats = snapshot();
    if stats.is_empty() {
        return;
    }

    eprintln!("\n=== Profile ===");
    eprintln!("{:<16} {:>10} {:>14} {:>12}", "category", "calls", "total ms", "avg us");
    for (category, s) in &stats {
        eprintln!(
            "{:<16} {:>10} {:>14.2} {:>12.2}",
            category,
            s.calls,
            s.total_ns as f64 / 1_000_000.0,
            s.average_us()
        );
    }
}
