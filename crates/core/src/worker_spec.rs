// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static description of a supervised worker. The executable body is
//! attached by `rk-runtime`'s supervisor, which is the only crate that
//! needs an async runtime in scope.

use crate::backoff::BackoffPolicy;
use serde::{Deserialize, Serialize};

/// Governs whether the supervisor restarts a worker after it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestartPolicy {
    /// Restart unconditionally, success or failure.
    Permanent,
    /// Restart only when the worker exits with an error (or panics).
    Transient,
    /// Never restart.
    Temporary,
}

impl RestartPolicy {
    /// Whether a worker that exited with `ok` should be restarted.
    pub fn should_restart(&self, ok: bool) -> bool {
        match self {
            RestartPolicy::Permanent => true,
            RestartPolicy::Transient => !ok,
            RestartPolicy::Temporary => false,
        }
    }
}

/// Metadata describing one worker under a supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSpec {
    pub name: String,
    pub policy: RestartPolicy,
    pub backoff: BackoffPolicy,
}

impl WorkerSpec {
    pub fn new(name: impl Into<String>, policy: RestartPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }
}

#[cfg(test)]
#[path = "worker_spec_tests.rs"]
mod tests;
