// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwards a domain or function kernel's locally-published logs to the
//! root's ingest endpoint. At-most-once: a record in flight when the
//! connection drops is lost, never retried.

use crate::error::{DialError, SinkError};
use async_trait::async_trait;
use parking_lot::Mutex;
use rk_core::{BackoffPolicy, LogRecord};
use rk_runtime::EventBus;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const DIAL_TIMEOUT: Duration = Duration::from_secs(5);
const MERGED_BUFFER: usize = 256;

/// The forwarder's own connection state, independent of the kernel's
/// lifecycle FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Dialing,
    Streaming,
}

/// A connected upstream sink. `rk-ingest`'s reference implementation
/// feeds this straight into a `SafeLogHub`; a real deployment would
/// plug in an RPC-backed implementation behind the same trait.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn send(&self, record: LogRecord) -> Result<(), SinkError>;
}

/// Produces a connected [`LogSink`], or fails within [`DIAL_TIMEOUT`].
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(&self) -> Result<Arc<dyn LogSink>, DialError>;
}

/// Filters out records that originated at the root itself, preventing
/// the forwarder from re-injecting logs it received via its own bus
/// subscription loop.
pub struct LoopGuard {
    root_id: String,
}

impl LoopGuard {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self { root_id: root_id.into() }
    }

    pub fn should_forward(&self, record: &LogRecord) -> bool {
        record.scope != "root" && record.kernel_id != self.root_id
    }
}

pub struct Forwarder {
    bus: Arc<EventBus>,
    dialer: Arc<dyn Dialer>,
    topics: Vec<String>,
    backoff: BackoffPolicy,
    loop_guard: LoopGuard,
    state: Mutex<ConnectionState>,
    attempts: AtomicU32,
}

impl Forwarder {
    pub fn new(bus: Arc<EventBus>, dialer: Arc<dyn Dialer>, topics: Vec<String>, root_id: impl Into<String>) -> Self {
        Self {
            bus,
            dialer,
            topics,
            backoff: BackoffPolicy { min: Duration::from_millis(200), max: Duration::from_secs(10), factor: 2.0, jitter: 0.2 },
            loop_guard: LoopGuard::new(root_id),
            state: Mutex::new(ConnectionState::Disconnected),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock() = state;
    }

    /// Runs until `ctx` is cancelled: merges every configured topic into
    /// one bounded channel, dials, streams, and reconnects with backoff
    /// on dial or send failure.
    pub async fn run(&self, ctx: CancellationToken) {
        let (merged_tx, mut merged_rx) = mpsc::channel::<LogRecord>(MERGED_BUFFER);
        for topic in &self.topics {
            let mut receiver = self.bus.subscribe(topic, ctx.clone());
            let tx = merged_tx.clone();
            tokio::spawn(async move {
                while let Some(msg) = receiver.rx.recv().await {
                    if let Ok(record) = msg.downcast::<LogRecord>() {
                        let _ = tx.try_send((*record).clone());
                    }
                }
            });
        }
        drop(merged_tx);

        loop {
            if ctx.is_cancelled() {
                self.set_state(ConnectionState::Disconnected);
                return;
            }

            self.set_state(ConnectionState::Dialing);
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let dial = tokio::time::timeout(DIAL_TIMEOUT, self.dialer.dial()).await;
            let sink = match dial {
                Ok(Ok(sink)) => sink,
                Ok(Err(_)) | Err(_) => {
                    self.set_state(ConnectionState::Disconnected);
                    let sleep = {
                        let mut rng = rand::rng();
                        self.backoff.duration_with_rng(attempt, &mut rng)
                    };
                    tokio::select! {
                        _ = tokio::time::sleep(sleep) => continue,
                        _ = ctx.cancelled() => return,
                    }
                }
            };

            self.attempts.store(0, Ordering::SeqCst);
            self.set_state(ConnectionState::Streaming);

            loop {
                tokio::select! {
                    _ = ctx.cancelled() => {
                        self.set_state(ConnectionState::Disconnected);
                        return;
                    }
                    record = merged_rx.recv() => {
                        let Some(record) = record else {
                            self.set_state(ConnectionState::Disconnected);
                            return;
                        };
                        if !self.loop_guard.should_forward(&record) {
                            continue;
                        }
                        if sink.send(record).await.is_err() {
                            self.set_state(ConnectionState::Disconnected);
                            break;
                        }
                    }
                }
            }

            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let sleep = {
                let mut rng = rand::rng();
                self.backoff.duration_with_rng(attempt, &mut rng)
            };
            tokio::select! {
                _ = tokio::time::sleep(sleep) => {}
                _ = ctx.cancelled() => return,
            }
        }
    }
}

#[cfg(test)]
#[path = "log_forwarder_tests.rs"]
mod tests;
