//! Step counters and logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Counters of sleep and wake transitions across steps.
pub struct SleepMetrics {
    step_count: AtomicU64,
    total_asleep: AtomicU64,
    total_woken: AtomicU64,
    sleeping_now: AtomicU64,
    start_time: Instant,
}

impl Default for SleepMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            total_asleep: AtomicU64::new(0),
            total_woken: AtomicU64::new(0),
            sleeping_now: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step.
    pub fn record_step(&self, asleep: usize, woken: usize, sleeping_now: usize) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
        self.total_asleep.fetch_add(asleep as u64, Ordering::Relaxed);
        self.total_woken.fetch_add(woken as u64, Ordering::Relaxed);
        self.sleeping_now.store(sleeping_now as u64, Ordering::Relaxed);

        // Log at info level every 1000 steps
        let step = self.step_count.load(Ordering::Relaxed);
        if step % 1000 == 0 {
            tracing::info!(
                step = step,
                sleeping = sleeping_now,
                total_asleep = self.total_asleep(),
                total_woken = self.total_woken(),
                "Sleep controller step"
            );
        }
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Awake-to-asleep transitions since creation.
    #[must_use]
    pub fn total_asleep(&self) -> u64 {
        self.total_asleep.load(Ordering::Relaxed)
    }

    /// Asleep-to-awake transitions since creation.
    #[must_use]
    pub fn total_woken(&self) -> u64 {
        self.total_woken.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn sleeping_now(&self) -> u64 {
        self.sleeping_now.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
