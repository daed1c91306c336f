// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process, topic-indexed pub/sub. Non-durable, at-most-once: a
//! publish that finds a subscriber's buffer full drops the message for
//! that subscriber rather than blocking the publisher.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const DEFAULT_BUFFER: usize = 16;
const DEFAULT_TOPIC: &str = "default";

/// An opaque, cheaply-cloneable published message. Topics carry
/// `Arc<dyn Any>` so callers can downcast to the concrete payload type
/// they expect for that topic.
pub type Message = Arc<dyn std::any::Any + Send + Sync>;

struct Subscription {
    id: u64,
    tx: mpsc::Sender<Message>,
}

#[derive(Default)]
struct Topics {
    by_topic: HashMap<String, Vec<Subscription>>,
}

/// A live subscription. Drop or call [`Receiver::cancel`] to unsubscribe
/// early; the subscription also unsubscribes itself when the
/// `CancellationToken` passed to `subscribe` fires.
pub struct Receiver {
    pub rx: mpsc::Receiver<Message>,
    unsubscribe: Arc<Unsubscribe>,
}

struct Unsubscribe {
    bus: Arc<EventBus>,
    topic: String,
    id: u64,
    once: std::sync::Once,
}

impl Unsubscribe {
    fn run(&self) {
        self.once.call_once(|| {
            let mut topics = self.bus.topics.write();
            if let Some(subs) = topics.by_topic.get_mut(&self.topic) {
                subs.retain(|s| s.id != self.id);
                if subs.is_empty() {
                    topics.by_topic.remove(&self.topic);
                }
            }
        });
    }
}

impl Receiver {
    /// Idempotent: safe to call more than once, and safe to race with
    /// the bound context's own cancellation.
    pub fn cancel(&self) {
        self.unsubscribe.run();
    }
}

/// The bus itself. Always held behind `Arc<EventBus>` so subscriptions
/// can outlive the call that created them and unsubscribe on drop.
pub struct EventBus {
    topics: RwLock<Topics>,
    buffer: usize,
    next_id: std::sync::atomic::AtomicU64,
}

impl EventBus {
    /// `buffer` is the per-subscriber channel capacity; non-positive
    /// values fall back to [`DEFAULT_BUFFER`](constant@DEFAULT_BUFFER).
    pub fn new(buffer: usize) -> Arc<Self> {
        Arc::new(Self {
            topics: RwLock::new(Topics::default()),
            buffer: if buffer == 0 { DEFAULT_BUFFER } else { buffer },
            next_id: std::sync::atomic::AtomicU64::new(0),
        })
    }

    /// A bus with the default per-subscriber buffer.
    pub fn with_default_buffer() -> Arc<Self> {
        Self::new(DEFAULT_BUFFER)
    }

    /// Publish never blocks beyond the subscriber-selection pass: each
    /// subscriber's send is a non-blocking `try_send`, and a full buffer
    /// silently drops the message for that subscriber. Empty topics are
    /// a no-op, matching subscribe's normalization asymmetry: you can
    /// subscribe to `""` (it becomes `"default"`) but publishing to `""`
    /// reaches no one.
    pub fn publish(&self, topic: &str, msg: Message) {
        if topic.is_empty() {
            return;
        }
        let topics = self.topics.read();
        if let Some(subs) = topics.by_topic.get(topic) {
            for sub in subs {
                let _ = sub.tx.try_send(msg.clone());
            }
        }
    }

    /// Subscribe to `topic` (empty normalizes to `"default"`). The
    /// returned receiver auto-cancels when `ctx` is cancelled.
    pub fn subscribe(self: &Arc<Self>, topic: &str, ctx: CancellationToken) -> Receiver {
        let topic = if topic.is_empty() { DEFAULT_TOPIC } else { topic }.to_string();
        let id = self.next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.buffer);

        let unsubscribe = Arc::new(Unsubscribe {
            bus: self.clone(),
            topic: topic.clone(),
            id,
            once: std::sync::Once::new(),
        });

        if ctx.is_cancelled() {
            // Already cancelled: never register, return a closed receiver.
            return Receiver { rx, unsubscribe };
        }

        self.topics.write().by_topic.entry(topic).or_default().push(Subscription { id, tx });

        let watcher = unsubscribe.clone();
        tokio::spawn(async move {
            ctx.cancelled().await;
            watcher.run();
        });

        Receiver { rx, unsubscribe }
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
