// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A rate-limited, bounded-queue log sink sitting between the scoped
//! loggers and the event bus, so a logging storm degrades gracefully
//! (dropped records, never blocked publishers) instead of taking down
//! the process.

use parking_lot::Mutex;
use rk_core::LogRecord;
use rk_runtime::EventBus;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const DEFAULT_BUFFER: usize = 1024;
const DEFAULT_RATE_MAX: i64 = 1000;
const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(1);
const DEFAULT_TOPIC: &str = "telemetry.logs";

/// A point-in-time snapshot of the hub's counters.
/// `total == forwarded + dropped_rate + dropped_queue` always holds.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub total: u64,
    pub forwarded: u64,
    pub dropped_rate: u64,
    pub dropped_queue: u64,
    pub rate_max: i64,
    pub rate_window: Duration,
    pub since: Instant,
}

struct Counters {
    total: AtomicU64,
    forwarded: AtomicU64,
    dropped_rate: AtomicU64,
    dropped_queue: AtomicU64,
    rate_now: AtomicI64,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            total: AtomicU64::new(0),
            forwarded: AtomicU64::new(0),
            dropped_rate: AtomicU64::new(0),
            dropped_queue: AtomicU64::new(0),
            rate_now: AtomicI64::new(0),
        }
    }
}

/// The hub itself. Built with [`SafeLogHub::spawn`], which owns the
/// background drain loop; drop the returned handle (or call
/// [`SafeLogHub::close`]) to stop it.
pub struct SafeLogHub {
    sender: mpsc::Sender<LogRecord>,
    counters: Arc<Counters>,
    rate_max: i64,
    rate_window: Duration,
    topics: Vec<String>,
    scope_topic: bool,
    drain: Mutex<Option<tokio::task::JoinHandle<()>>>,
    cancel: CancellationToken,
    started_at: Mutex<Instant>,
}

/// Builder knobs mirroring the original's functional options.
pub struct SafeLogHubOptions {
    pub buffer: usize,
    pub rate_max: i64,
    pub rate_window: Duration,
    pub topics: Vec<String>,
    pub scope_topic: bool,
}

impl Default for SafeLogHubOptions {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            rate_max: DEFAULT_RATE_MAX,
            rate_window: DEFAULT_RATE_WINDOW,
            topics: vec![DEFAULT_TOPIC.to_string()],
            scope_topic: false,
        }
    }
}

impl SafeLogHub {
    /// Spawns the background drain loop against `bus` and returns the
    /// hub handle. The loop resets the rate-limit window on a
    /// `rate_window`-period tick using the monotonic clock, and forwards
    /// queued records to `bus` otherwise.
    pub fn spawn(bus: Arc<EventBus>, options: SafeLogHubOptions) -> Arc<Self> {
        let buffer = if options.buffer == 0 { DEFAULT_BUFFER } else { options.buffer };
        let (sender, mut receiver) = mpsc::channel(buffer);
        let counters = Arc::new(Counters::default());
        let cancel = CancellationToken::new();

        let hub = Arc::new(Self {
            sender,
            counters: counters.clone(),
            rate_max: options.rate_max,
            rate_window: options.rate_window,
            topics: options.topics.clone(),
            scope_topic: options.scope_topic,
            drain: Mutex::new(None),
            cancel: cancel.clone(),
            started_at: Mutex::new(Instant::now()),
        });

        let topics = options.topics;
        let scope_topic = options.scope_topic;
        let window = options.rate_window;
        let loop_cancel = cancel.clone();
        let hub_for_loop = hub.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(window);
            ticker.tick().await; // consume the immediate first tick
            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => return,
                    _ = ticker.tick() => {
                        hub_for_loop.counters.rate_now.store(0, Ordering::SeqCst);
                        *hub_for_loop.started_at.lock() = Instant::now();
                    }
                    record = receiver.recv() => {
                        let Some(record) = record else { return };
                        for topic in &topics {
                            bus.publish(topic, Arc::new(record.clone()));
                        }
                        if scope_topic && !record.scope.is_empty() {
                            bus.publish(&format!("{DEFAULT_TOPIC}.{}", record.scope), Arc::new(record.clone()));
                        }
                        hub_for_loop.counters.forwarded.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        });

        *hub.drain.lock() = Some(handle);
        hub
    }

    /// Attempts to enqueue `record`. Returns `true` iff it was accepted
    /// (rate budget available and queue not full); `false` means it was
    /// dropped and the appropriate counter was incremented.
    pub fn publish(&self, record: LogRecord) -> bool {
        self.counters.total.fetch_add(1, Ordering::SeqCst);

        if self.rate_max > 0 {
            let now = self.counters.rate_now.fetch_add(1, Ordering::SeqCst) + 1;
            if now > self.rate_max {
                self.counters.dropped_rate.fetch_add(1, Ordering::SeqCst);
                return false;
            }
        }

        match self.sender.try_send(record) {
            Ok(()) => true,
            Err(_) => {
                self.counters.dropped_queue.fetch_add(1, Ordering::SeqCst);
                false
            }
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.counters.total.load(Ordering::SeqCst),
            forwarded: self.counters.forwarded.load(Ordering::SeqCst),
            dropped_rate: self.counters.dropped_rate.load(Ordering::SeqCst),
            dropped_queue: self.counters.dropped_queue.load(Ordering::SeqCst),
            rate_max: self.rate_max,
            rate_window: self.rate_window,
            since: *self.started_at.lock(),
        }
    }

    /// Idempotent: stops the drain loop and waits for it to exit.
    pub async fn close(&self) {
        self.cancel.cancel();
        let handle = self.drain.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
#[path = "safe_log_hub_tests.rs"]
mod tests;
