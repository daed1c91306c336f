// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervises a set of named workers under restart policies, with
//! exponential backoff between restarts and panic capture.

use crate::error::SupervisorError;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use rk_core::{BackoffPolicy, RestartPolicy, WorkerSpec};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;

/// A cancellable, long-running worker body. Must return on its own or
/// when `ctx` is cancelled.
pub type WorkerFn = Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Exit,
    Restart,
    Panic,
    Stop,
}

/// One lifecycle notification emitted by the supervisor.
#[derive(Debug, Clone)]
pub struct Event {
    pub time: SystemTime,
    pub worker: String,
    pub kind: EventKind,
    pub attempt: u32,
    pub error: Option<String>,
    pub next_after: Option<std::time::Duration>,
}

pub type OnEvent = Arc<dyn Fn(Event) + Send + Sync>;

struct RunningWorker {
    cancel: CancellationToken,
}

/// Supervises workers started with [`Supervisor::start`]. All workers'
/// cancellation tokens are children of the supervisor's root token, so
/// [`Supervisor::stop_all`] cascades without iterating — the explicit
/// per-worker cancel loop underneath is a belt-and-braces second pass.
pub struct Supervisor {
    root: CancellationToken,
    workers: Mutex<HashMap<String, RunningWorker>>,
    tasks: Mutex<Vec<tokio::task::JoinHandle<()>>>,
    on_event: Option<OnEvent>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self { root: CancellationToken::new(), workers: Mutex::new(HashMap::new()), tasks: Mutex::new(Vec::new()), on_event: None }
    }

    pub fn with_on_event(mut self, handler: OnEvent) -> Self {
        self.on_event = Some(handler);
        self
    }

    fn emit(&self, event: Event) {
        if let Some(handler) = &self.on_event {
            handler(event);
        }
    }

    /// Starts `spec` running `body`. Errors if the name is empty or
    /// already registered — a `WorkerSpec` name is unique within its
    /// supervisor.
    pub fn start(&self, spec: WorkerSpec, body: WorkerFn) -> Result<(), SupervisorError> {
        if spec.name.is_empty() {
            return Err(SupervisorError::EmptyName);
        }
        let mut workers = self.workers.lock();
        if workers.contains_key(&spec.name) {
            return Err(SupervisorError::AlreadyExists(spec.name));
        }
        let cancel = self.root.child_token();
        workers.insert(spec.name.clone(), RunningWorker { cancel: cancel.clone() });
        drop(workers);

        let name = spec.name.clone();
        let policy = spec.policy;
        let backoff = spec.backoff;
        let on_event = self.on_event.clone();

        let handle = tokio::spawn(run_worker(name, policy, backoff, body, cancel, on_event));
        self.tasks.lock().push(handle);
        Ok(())
    }

    /// Soft-stops a single worker by name; idempotent.
    pub fn stop(&self, name: &str) {
        let workers = self.workers.lock();
        if let Some(w) = workers.get(name) {
            w.cancel.cancel();
        }
    }

    /// Cancels the root token (cascading to every worker's child token)
    /// and explicitly walks the worker map as a second, redundant pass.
    pub fn stop_all(&self) {
        self.root.cancel();
        let workers = self.workers.lock();
        for w in workers.values() {
            w.cancel.cancel();
        }
    }

    /// Waits for every spawned worker task to finish.
    pub async fn wait(&self) {
        let handles: Vec<_> = self.tasks.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_worker(
    name: String,
    policy: RestartPolicy,
    backoff: BackoffPolicy,
    body: WorkerFn,
    cancel: CancellationToken,
    on_event: Option<OnEvent>,
) {
    let emit = |event: Event| {
        if let Some(handler) = &on_event {
            handler(event);
        }
    };
    let mut attempt: u32 = 0;

    loop {
        // `cancel` is a child of the supervisor's root token, so this also
        // catches `stop_all`'s cascaded cancellation, not just a per-worker
        // `stop(name)`.
        if cancel.is_cancelled() {
            emit(Event { time: SystemTime::now(), worker: name.clone(), kind: EventKind::Stop, attempt, error: None, next_after: None });
            return;
        }

        attempt += 1;
        emit(Event { time: SystemTime::now(), worker: name.clone(), kind: EventKind::Start, attempt, error: None, next_after: None });

        let fut = body(cancel.clone());
        let result = AssertUnwindSafe(fut).catch_unwind().await;
        let outcome = match result {
            Ok(inner) => inner,
            Err(panic) => {
                let message = panic_message(&panic);
                emit(Event {
                    time: SystemTime::now(),
                    worker: name.clone(),
                    kind: EventKind::Panic,
                    attempt,
                    error: Some(message.clone()),
                    next_after: None,
                });
                Err(message)
            }
        };

        emit(Event {
            time: SystemTime::now(),
            worker: name.clone(),
            kind: EventKind::Exit,
            attempt,
            error: outcome.as_ref().err().cloned(),
            next_after: None,
        });

        if !policy.should_restart(outcome.is_ok()) {
            return;
        }

        // A per-worker stop() cancels `cancel` directly without touching
        // the root token, so the policy may still say "restart" here even
        // though the worker was told to halt. Don't announce a restart
        // that the select below is about to cancel anyway.
        if cancel.is_cancelled() {
            emit(Event { time: SystemTime::now(), worker: name.clone(), kind: EventKind::Stop, attempt, error: None, next_after: None });
            return;
        }

        let sleep = {
            let mut rng = rand::rng();
            backoff.duration_with_rng(attempt, &mut rng)
        };
        emit(Event {
            time: SystemTime::now(),
            worker: name.clone(),
            kind: EventKind::Restart,
            attempt,
            error: outcome.err(),
            next_after: Some(sleep),
        });

        tokio::select! {
            _ = tokio::time::sleep(sleep) => {}
            _ = cancel.cancelled() => return,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: <non-string payload>".to_string()
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
