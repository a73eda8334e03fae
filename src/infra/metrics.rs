//! Lock-free metrics collection and periodic reporting
//!
//! Uses atomics for hot-path operations to avoid mutex contention.
//! All counter updates are lock-free; reporting is the only operation
//! that needs synchronization (via atomic swap).
//!
//! NOTE: All atomics use Relaxed ordering intentionally—these are
//! statistical counters only. Do NOT use these atomics for coordination
//! or logic decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::info;

/// Update an atomic max value using compare-and-swap loop
#[inline]
fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Lock-free metrics collector for the recognition path
///
/// All recording operations are lock-free using atomics. The `report()`
/// method atomically swaps interval counters to get a consistent snapshot.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total frames ever processed (monotonic)
    frames_total: AtomicU64,
    /// Frames since last report (reset on report)
    frames_since_report: AtomicU64,
    /// Frames with no hand detected (monotonic)
    frames_no_hand: AtomicU64,
    /// Rule classifier matches (monotonic)
    rule_matches: AtomicU64,
    /// Reference comparisons performed (monotonic)
    comparisons: AtomicU64,
    /// Attempts that cleared the precision threshold (monotonic)
    attempts_passed: AtomicU64,
    /// Attempts that did not (monotonic)
    attempts_failed: AtomicU64,
    /// Sum of evaluate latencies in microseconds (reset on report)
    latency_sum_us: AtomicU64,
    /// Max evaluate latency in microseconds (reset on report)
    latency_max_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&self) {
        self.frames_total.fetch_add(1, Ordering::Relaxed);
        self.frames_since_report.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_no_hand(&self) {
        self.frames_no_hand.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rule_match(&self) {
        self.rule_matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_verdict(&self, is_correct: bool) {
        if is_correct {
            self.attempts_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.attempts_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record evaluate latency measured from an Instant
    pub fn record_latency(&self, start: Instant) {
        let latency_us = start.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        update_atomic_max(&self.latency_max_us, latency_us);
    }

    pub fn frames_total(&self) -> u64 {
        self.frames_total.load(Ordering::Relaxed)
    }

    pub fn attempts_passed(&self) -> u64 {
        self.attempts_passed.load(Ordering::Relaxed)
    }

    pub fn attempts_failed(&self) -> u64 {
        self.attempts_failed.load(Ordering::Relaxed)
    }

    /// Emit a metrics report and reset the interval counters
    pub fn report(&self) {
        let frames = self.frames_since_report.swap(0, Ordering::Relaxed);
        let latency_sum = self.latency_sum_us.swap(0, Ordering::Relaxed);
        let latency_max = self.latency_max_us.swap(0, Ordering::Relaxed);

        let latency_avg = if frames > 0 { latency_sum / frames } else { 0 };

        info!(
            frames = %frames,
            frames_total = %self.frames_total.load(Ordering::Relaxed),
            no_hand_total = %self.frames_no_hand.load(Ordering::Relaxed),
            rule_matches_total = %self.rule_matches.load(Ordering::Relaxed),
            comparisons_total = %self.comparisons.load(Ordering::Relaxed),
            passed_total = %self.attempts_passed.load(Ordering::Relaxed),
            failed_total = %self.attempts_failed.load(Ordering::Relaxed),
            latency_avg_us = %latency_avg,
            latency_max_us = %latency_max,
            "metrics_report"
        );
    }
}

/// Spawn a task emitting a metrics report every `interval_secs`
///
/// The first tick fires immediately and is swallowed so reports start
/// one full interval after spawn. The caller aborts the handle at
/// session end and emits a final report itself.
pub fn spawn_reporter(metrics: Arc<Metrics>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            metrics.report();
        }
    })
}
