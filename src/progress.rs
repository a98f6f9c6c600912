//! # Progress — Atomic Verification Counters
//!
//! Thread-safe progress tracking shared between verifier workers and the
//! background status reporter. Counters are atomics updated once per chunk;
//! a Mutex guards only the current-chunk label (low contention, written once
//! per chunk, not per value).
//!
//! ## Background Reporter
//!
//! A dedicated thread logs progress at a fixed interval: values checked,
//! primes seen, chunks completed, rate and the most recently claimed chunk.
//! It polls the `shutdown` flag every 100 ms so the coordinator can join it
//! promptly at the end of a run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const POLL: Duration = Duration::from_millis(100);

pub struct Progress {
    pub tested: AtomicU64,
    pub primes: AtomicU64,
    pub chunks: AtomicU64,
    pub current: Mutex<String>,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            tested: AtomicU64::new(0),
            primes: AtomicU64::new(0),
            chunks: AtomicU64::new(0),
            current: Mutex::new(String::new()),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Record one finished chunk.
    pub fn record_chunk(&self, tested: u64, primes: u64) {
        self.tested.fetch_add(tested, Ordering::Relaxed);
        self.primes.fetch_add(primes, Ordering::Relaxed);
        self.chunks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_current(&self, label: String) {
        if let Ok(mut current) = self.current.lock() {
            *current = label;
        }
    }

    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || {
            let mut last = Instant::now();
            loop {
                thread::sleep(POLL);
                if progress.is_stopped() {
                    break;
                }
                if last.elapsed() >= interval {
                    progress.print_status();
                    last = Instant::now();
                }
            }
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let tested = self.tested.load(Ordering::Relaxed);
        let primes = self.primes.load(Ordering::Relaxed);
        let chunks = self.chunks.load(Ordering::Relaxed);
        let current = self
            .current
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default();
        let rate = if elapsed.as_secs() > 0 {
            tested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            current = %current,
            tested,
            primes,
            chunks,
            rate = format_args!("{:.2}", rate),
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "verification progress"
        );
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
